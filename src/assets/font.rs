use std::path::PathBuf;
use std::sync::Arc;

use usvg::fontdb;

use crate::foundation::error::{MetroError, MetroResult};

/// Where the label font comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    /// Installed family, resolved at bold weight from system fonts.
    System {
        /// Family name, e.g. `"Falling Sky"`.
        family: String,
    },
    /// Font file on disk (TTF/OTF/TTC); the first face is used.
    File(PathBuf),
}

impl FontSource {
    /// Source for an installed family.
    pub fn system(family: impl Into<String>) -> Self {
        Self::System {
            family: family.into(),
        }
    }
}

/// Raw font bytes plus the face they resolved to.
#[derive(Clone, Debug)]
pub struct LoadedFont {
    /// Family name reported by the face.
    pub family: String,
    /// Whole font file contents.
    pub bytes: Arc<Vec<u8>>,
    /// Face index within `bytes` (non-zero only for collections).
    pub index: u32,
}

/// Resolve `source` into font bytes. A missing font is an error.
#[tracing::instrument]
pub fn load_font(source: &FontSource) -> MetroResult<LoadedFont> {
    let mut db = fontdb::Database::new();
    let id = match source {
        FontSource::System { family } => {
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system font database");
            let families = [fontdb::Family::Name(family.as_str())];
            db.query(&fontdb::Query {
                families: &families,
                weight: fontdb::Weight::BOLD,
                ..fontdb::Query::default()
            })
            .ok_or_else(|| {
                MetroError::render(format!("font family '{family}' is not installed"))
            })?
        }
        FontSource::File(path) => {
            use anyhow::Context as _;
            let bytes = std::fs::read(path)
                .with_context(|| format!("read font file '{}'", path.display()))?;
            db.load_font_data(bytes);
            db.faces().next().map(|f| f.id).ok_or_else(|| {
                MetroError::render(format!("'{}' contains no font faces", path.display()))
            })?
        }
    };

    let family = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .ok_or_else(|| MetroError::render("resolved font face has no family name"))?;
    let (bytes, index) = db
        .with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| MetroError::render(format!("failed to read font data for '{family}'")))?;

    tracing::info!(%family, index, len = bytes.len(), "resolved label font");
    Ok(LoadedFont {
        family,
        bytes: Arc::new(bytes),
        index,
    })
}
