use super::backmatter::build_resource_index;
use super::controls::category_to_group;
use crate::error::{CoreError, CoreResult};
use crate::gemara::GuidanceDocument;
use crate::ids::IdGenerator;
use crate::oscal::{Catalog, Metadata, Party, ResponsibleParty, Role};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};
use tracing::debug;

const AUTHOR_ROLE_ID: &str = "author";

/// Converts a guidance document into a catalog. Fails only when the
/// publication date or last-modified timestamp cannot be parsed.
pub fn to_catalog(guidance: &GuidanceDocument, ids: &dyn IdGenerator) -> CoreResult<Catalog> {
    let published = parse_publication_date(&guidance.metadata.publication_date)?;
    let last_modified = parse_last_modified(&guidance.metadata.last_modified)?;

    let mut metadata = Metadata::sample(last_modified);
    metadata.title = guidance.metadata.title.clone();
    metadata.published = Some(published);
    metadata.version = guidance.metadata.version.clone();

    let author = Party {
        uuid: ids.next_id(),
        party_type: "person".to_string(),
        name: Some(guidance.metadata.author.clone()),
    };
    metadata.responsible_parties = vec![ResponsibleParty {
        role_id: AUTHOR_ROLE_ID.to_string(),
        party_uuids: vec![author.uuid.clone()],
    }];
    metadata.roles = vec![Role {
        id: AUTHOR_ROLE_ID.to_string(),
        title: "Author".to_string(),
        description: Some("Author of the guidance document".to_string()),
    }];
    metadata.parties = vec![author];

    let resources = build_resource_index(&guidance.metadata.resources, ids);
    let groups: Vec<_> = guidance
        .categories
        .iter()
        .map(|category| category_to_group(category, &resources))
        .collect();

    debug!(
        document = %guidance.metadata.id,
        groups = groups.len(),
        resources = guidance.metadata.resources.len(),
        "converted guidance document to catalog"
    );

    Ok(Catalog {
        uuid: ids.next_id(),
        metadata,
        groups,
        back_matter: resources.back_matter,
    })
}

/// `YYYY-MM-DD` → midnight UTC, RFC 3339.
fn parse_publication_date(raw: &str) -> CoreResult<String> {
    let date = Date::parse(raw, format_description!("[year]-[month]-[day]")).map_err(|source| {
        CoreError::DateParse {
            field: "publication-date",
            value: raw.to_string(),
            source,
        }
    })?;
    Ok(date.midnight().assume_utc().format(&Rfc3339)?)
}

/// `YYYY-MM-DD HH:MM:SS` (UTC) → RFC 3339.
fn parse_last_modified(raw: &str) -> CoreResult<String> {
    let stamp = PrimitiveDateTime::parse(
        raw,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .map_err(|source| CoreError::DateParse {
        field: "last-modified",
        value: raw.to_string(),
        source,
    })?;
    Ok(stamp.assume_utc().format(&Rfc3339)?)
}
