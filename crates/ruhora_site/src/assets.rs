//! Static asset references
//!
//! Every image path the page references, and a check that each one exists
//! under a public directory. Paths are site-absolute (`/products/...`).

use crate::content::{journal_entries, products};
use crate::error::{Result, SiteError};
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Images referenced outside the catalogue (header, hero, footer)
const PAGE_ASSETS: [&str; 5] = [
    "/logo.png",
    "/homepage_background.png",
    "/images/social-media/whatsapp.svg",
    "/images/social-media/instagram.svg",
    "/images/social-media/facebook.svg",
];

/// Every referenced asset path, deduplicated, in page order
pub fn referenced_assets() -> Vec<&'static str> {
    let catalogue = products().iter().flat_map(|product| {
        std::iter::once(product.image)
            .chain(product.ingredients.iter().map(|i| i.icon))
            .chain(std::iter::once(product.ritual.image))
            .chain(product.ritual.steps.iter().map(|s| s.icon))
    });
    let journal = journal_entries().iter().map(|entry| entry.image);

    let mut seen = FxHashSet::default();
    PAGE_ASSETS
        .into_iter()
        .chain(catalogue)
        .chain(journal)
        .filter(|path| seen.insert(*path))
        .collect()
}

/// Filesystem location of a site-absolute asset path
pub fn resolve(public_dir: &Path, asset: &str) -> PathBuf {
    public_dir.join(asset.trim_start_matches('/'))
}

/// Referenced assets that do not exist under `public_dir`
pub fn missing_assets(public_dir: &Path) -> Vec<PathBuf> {
    referenced_assets()
        .into_iter()
        .map(|asset| resolve(public_dir, asset))
        .filter(|path| !path.is_file())
        .collect()
}

/// Fail on the first referenced asset missing under `public_dir`
pub fn validate(public_dir: &Path) -> Result<()> {
    let missing = missing_assets(public_dir);
    debug!(
        dir = %public_dir.display(),
        missing = missing.len(),
        "assets checked"
    );
    match missing.into_iter().next() {
        Some(path) => Err(SiteError::MissingAsset(path)),
        None => Ok(()),
    }
}
