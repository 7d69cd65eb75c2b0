//! `genhook requirements` command

use anyhow::Result;

use genhook::core::{PackageOptions, Requirement};
use genhook::util::GlobalContext;

fn option_str(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn print_section(title: &str, reqs: &[Requirement], options: impl Fn(&str) -> PackageOptions) {
    if reqs.is_empty() {
        return;
    }

    println!("{}:", title);
    let width = reqs.iter().map(|r| r.to_string().len()).max().unwrap_or(0);

    for req in reqs {
        let opts = options(req.name());
        println!(
            "  {:<width$}  {:<5}  shared={} fPIC={}",
            req.to_string(),
            req.constraint().kind(),
            option_str(opts.shared),
            option_str(opts.fpic),
            width = width
        );
    }
}

pub fn execute() -> Result<()> {
    let ctx = GlobalContext::new()?;
    let recipe = ctx.recipe()?;

    match recipe.path() {
        Some(path) => println!("{}/{} ({})", recipe.name(), recipe.version(), path.display()),
        None => println!("{}/{} (built-in recipe)", recipe.name(), recipe.version()),
    }
    println!(
        "options: shared={} fPIC={}",
        option_str(recipe.options.shared),
        option_str(recipe.options.fpic)
    );
    println!();

    print_section("requires", recipe.requires(), |name| {
        recipe.dependency_options(name)
    });
    print_section("tool-requires", recipe.tool_requires(), |name| {
        recipe.dependency_options(name)
    });

    Ok(())
}
