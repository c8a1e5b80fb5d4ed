use std::path::Path;

use clap::Parser;
use tracing::{info, warn};

use cambia_dietas_rs::calculator::{ConversionSession, SessionEvent};
use cambia_dietas_rs::catalog::{
    bundled_catalog, load_catalog_file, save_catalog_file, AssetIndex, Catalog, CatalogRepository,
    FoodRepository, FoodStore,
};
use cambia_dietas_rs::cli::{Cli, Command};
use cambia_dietas_rs::error::{CambiaError, Result};
use cambia_dietas_rs::interface::{
    display_categories, display_conversion, display_food_list, prompt_amount, prompt_category,
    prompt_food, prompt_session_action, prompt_yes_no, suggest_food_names, SessionAction,
};
use cambia_dietas_rs::logging;
use cambia_dietas_rs::models::FoodItem;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let catalog = open_catalog(cli.catalog.as_deref())?;
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Interactive => cmd_interactive(catalog),
        Command::Categories => cmd_categories(catalog),
        Command::Foods { category } => cmd_foods(catalog, &category),
        Command::Convert {
            food,
            amount,
            alternative,
        } => cmd_convert(catalog, &food, &amount, &alternative),
        Command::Validate => cmd_validate(&catalog),
        Command::Export { output } => cmd_export(&catalog, &output),
    }
}

/// Load the catalog from `path`, or the bundled one.
fn open_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) if !path.exists() => Err(CambiaError::InvalidInput(format!(
            "catalog file not found: {}",
            path.display()
        ))),
        Some(path) => load_catalog_file(path),
        None => {
            info!("using bundled catalog");
            bundled_catalog()
        }
    }
}

fn repository_for(catalog: &Catalog) -> Result<CatalogRepository> {
    let store = FoodStore::new(catalog.foods.clone())?;
    Ok(CatalogRepository::new(store))
}

/// List categories.
fn cmd_categories(catalog: Catalog) -> Result<()> {
    let repo = repository_for(&catalog)?;
    display_categories(&repo.list_categories().current());
    Ok(())
}

/// List the foods of one category.
fn cmd_foods(catalog: Catalog, category: &str) -> Result<()> {
    let repo = repository_for(&catalog)?;
    let foods = repo.list_foods_in_category(category).current();
    let assets = AssetIndex::from_foods(&foods);
    display_food_list(&foods, &catalog.units, &assets, category);
    Ok(())
}

/// One-shot conversion from the command line.
fn cmd_convert(catalog: Catalog, food: &str, amount: &str, alternative: &str) -> Result<()> {
    let repo = repository_for(&catalog)?;
    let all_foods = repo.all_foods();

    let reference = match repo.get_food_by_name(food).current() {
        Some(reference) => reference,
        None => {
            print_suggestions(food, &all_foods);
            return Err(CambiaError::FoodNotFound(food.to_string()));
        }
    };

    let alternative_food = match repo
        .get_food_in_category(&reference.category, alternative)
        .current()
    {
        Some(food) => food,
        None => {
            let fallback = repo.get_food_or_placeholder(alternative);
            if fallback.is_placeholder() {
                print_suggestions(alternative, &all_foods);
            }
            fallback
        }
    };

    let mut session = ConversionSession::new(reference, catalog.units.clone())?;
    session.select_alternative(alternative_food)?;
    let state = session.set_amount_text(amount);
    display_conversion(state);
    Ok(())
}

/// Report catalog health. Hard integrity errors already fail at load time.
fn cmd_validate(catalog: &Catalog) -> Result<()> {
    let repo = repository_for(catalog)?;
    let categories = repo.list_categories().current();
    let mut warnings = 0;

    for category in &categories {
        let foods = repo.list_foods_in_category(category).current();
        if foods.len() < 2 {
            warn!(category = %category, "category has no alternatives");
            println!("  category '{}' has only {} food(s)", category, foods.len());
            warnings += 1;
        }
        for food in &foods {
            if catalog.units.label_for(&food.name).is_none() {
                println!("  '{}' has no measurement unit", food.name);
                warnings += 1;
            }
        }
    }

    println!(
        "Catalog OK: {} foods in {} categories ({} warnings)",
        repo.store().len(),
        categories.len(),
        warnings
    );
    Ok(())
}

/// Export the catalog as JSON or CSV, by file extension.
fn cmd_export(catalog: &Catalog, output: &Path) -> Result<()> {
    save_catalog_file(output, catalog)?;
    println!("Exported {} foods to {}", catalog.foods.len(), output.display());
    Ok(())
}

/// Menu-driven conversions until the user is done.
fn cmd_interactive(catalog: Catalog) -> Result<()> {
    let repo = repository_for(&catalog)?;
    if repo.store().is_empty() {
        return Err(CambiaError::NoFoods);
    }

    loop {
        let categories = repo.list_categories().current();
        let category = prompt_category(&categories)?;
        let foods = repo.list_foods_in_category(&category).current();

        let assets = AssetIndex::from_foods(&foods);
        display_food_list(&foods, &catalog.units, &assets, &category);

        let reference = prompt_food(&foods, "Which food do you want to swap?")?;
        run_session(&repo, &catalog, reference, &foods)?;

        if !prompt_yes_no("Convert another food?", true)? {
            break;
        }
    }

    Ok(())
}

fn run_session(
    repo: &CatalogRepository,
    catalog: &Catalog,
    reference: FoodItem,
    category_foods: &[FoodItem],
) -> Result<()> {
    let alternatives: Vec<FoodItem> = category_foods
        .iter()
        .filter(|f| f.name != reference.name)
        .cloned()
        .collect();
    if alternatives.is_empty() {
        println!("No alternatives for {} in this category.", reference.name);
        return Ok(());
    }

    let (reference_updates, _subscription) = repo
        .get_food_in_category(&reference.category, &reference.name)
        .into_channel();

    let mut session = ConversionSession::new(reference, catalog.units.clone())?;
    session.subscribe(display_conversion);

    let first = prompt_food(&alternatives, "Swap it for")?;
    session.handle(SessionEvent::AlternativeSelected(first))?;

    loop {
        session.drain_reference_updates(&reference_updates)?;

        match prompt_session_action()? {
            SessionAction::EnterAmount => {
                let state = session.state();
                let text = prompt_amount(&state.reference.name, &state.reference_unit)?;
                session.handle(SessionEvent::AmountChanged(text))?;
            }
            SessionAction::ChangeAlternative => {
                let food = prompt_food(&alternatives, "Swap it for")?;
                session.handle(SessionEvent::AlternativeSelected(food))?;
            }
            SessionAction::Reset => {
                session.handle(SessionEvent::Reset)?;
            }
            SessionAction::Done => break,
        }
    }

    Ok(())
}

fn print_suggestions(name: &str, foods: &[FoodItem]) {
    let suggestions = suggest_food_names(name, foods);
    if suggestions.is_empty() {
        println!("No food named '{}'.", name);
    } else {
        println!("No food named '{}'. Did you mean: {}?", name, suggestions.join(", "));
    }
}
