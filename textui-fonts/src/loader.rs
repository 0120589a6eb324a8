//! System font discovery via fontdb.

use fontdb::{Database, Family, ID, Query, Weight};

use crate::error::FontError;
use crate::font_data::FontData;

/// Load a monospace font from the system font database.
///
/// The requested family is tried first (bold or regular weight); when it is
/// missing, the generic monospace family is used, and after that any face
/// flagged as monospaced. Fails only when the system has no usable
/// monospace font at all.
pub fn load_monospace_font(family: &str, bold: bool) -> Result<FontData, FontError> {
    let mut font_db = Database::new();
    font_db.load_system_fonts();
    log::info!("Loaded {} system fonts", font_db.len());
    select_monospace_font(&font_db, family, bold)
}

fn select_monospace_font(
    font_db: &Database,
    family: &str,
    bold: bool,
) -> Result<FontData, FontError> {
    let weight = if bold { Weight::BOLD } else { Weight::NORMAL };

    if let Some(font) = query_font(font_db, Family::Name(family), weight) {
        log::info!("Loaded font '{}' (bold={})", family, bold);
        return Ok(font);
    }
    log::warn!(
        "Font '{}' not found, falling back to the system monospace family",
        family
    );

    query_font(font_db, Family::Monospace, weight)
        .or_else(|| query_font(font_db, Family::Monospace, Weight::NORMAL))
        .or_else(|| scan_monospaced_faces(font_db, weight))
        .ok_or_else(|| FontError::NotFound {
            family: family.to_string(),
        })
}

/// Last resort when the monospace alias resolves to nothing: any face the
/// database flagged as monospaced, closest weight first.
fn scan_monospaced_faces(font_db: &Database, weight: Weight) -> Option<FontData> {
    let mut faces: Vec<_> = font_db.faces().filter(|face| face.monospaced).collect();
    faces.sort_by_key(|face| face.weight.0.abs_diff(weight.0));
    let font = faces.into_iter().find_map(|face| load_face(font_db, face.id))?;
    log::warn!("Using first available monospaced face as fallback");
    Some(font)
}

fn query_font(font_db: &Database, family: Family<'_>, weight: Weight) -> Option<FontData> {
    let query = Query {
        families: &[family],
        weight,
        style: fontdb::Style::Normal,
        ..Query::default()
    };
    let id = font_db.query(&query)?;
    load_face(font_db, id)
}

fn load_face(font_db: &Database, id: ID) -> Option<FontData> {
    let (data, index) = font_db.with_face_data(id, |data, index| (data.to_vec(), index))?;
    match FontData::new(data, index as usize) {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("Font face {:?} found but failed to load: {}", id, e);
            None
        }
    }
}
