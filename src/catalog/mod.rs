mod assets;
mod live;
mod persistence;
mod repository;
mod store;
mod units;

pub use assets::{asset_slug, AssetIndex, PLACEHOLDER_ASSET};
pub use live::LiveQuery;
pub use persistence::{
    bundled_catalog, dedupe_foods, load_catalog, load_catalog_csv, load_catalog_file, parse_catalog,
    save_catalog, save_catalog_csv, save_catalog_file, validate_catalog, Catalog,
};
pub use repository::{CatalogRepository, FoodRepository};
pub use store::{FoodStore, Subscription};
pub use units::UnitLabels;
