use crate::gemara::ResourceReference;
use crate::ids::IdGenerator;
use crate::oscal::common::non_empty;
use crate::oscal::extensions::{trestle_prop, RESOURCE_ID_PROP};
use crate::oscal::{BackMatter, Citation, Resource, ResourceLink};
use std::collections::HashMap;

/// Back-matter plus the source-id → generated-uuid table used to resolve
/// external references while converting one document.
#[derive(Debug, Default)]
pub struct ResourceIndex {
    pub back_matter: Option<BackMatter>,
    uuids: HashMap<String, String>,
}

impl ResourceIndex {
    pub fn uuid_for(&self, source_id: &str) -> Option<&str> {
        self.uuids.get(source_id).map(String::as_str)
    }
}

pub fn build_resource_index(refs: &[ResourceReference], ids: &dyn IdGenerator) -> ResourceIndex {
    let mut resources = Vec::with_capacity(refs.len());
    let mut uuids = HashMap::new();
    for reference in refs {
        let resource = resource_from_reference(reference, ids);
        uuids.insert(reference.id.clone(), resource.uuid.clone());
        resources.push(resource);
    }

    let back_matter = if resources.is_empty() {
        None
    } else {
        Some(BackMatter { resources })
    };
    ResourceIndex { back_matter, uuids }
}

fn resource_from_reference(reference: &ResourceReference, ids: &dyn IdGenerator) -> Resource {
    let rlinks = if reference.url.is_empty() {
        Vec::new()
    } else {
        vec![ResourceLink {
            href: reference.url.clone(),
            media_type: None,
        }]
    };
    Resource {
        uuid: ids.next_id(),
        title: non_empty(&reference.title),
        description: non_empty(&reference.description),
        props: vec![trestle_prop(RESOURCE_ID_PROP, reference.id.as_str())],
        citation: Some(Citation {
            text: citation_text(reference),
        }),
        rlinks,
    }
}

pub fn citation_text(reference: &ResourceReference) -> String {
    format!(
        "{}. ({}). *{}*. {}",
        reference.issuing_body, reference.publication_date, reference.title, reference.url
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIdGenerator;

    fn nist_ref() -> ResourceReference {
        ResourceReference {
            id: "SP800-161".to_string(),
            title: "Cybersecurity Supply Chain Risk Management Practices".to_string(),
            description: String::new(),
            url: "https://doi.org/10.6028/NIST.SP.800-161r1".to_string(),
            issuing_body: "NIST".to_string(),
            publication_date: "2022-05-05".to_string(),
        }
    }

    #[test]
    fn citation_follows_issuer_date_title_url() {
        assert_eq!(
            citation_text(&nist_ref()),
            "NIST. (2022-05-05). *Cybersecurity Supply Chain Risk Management Practices*. https://doi.org/10.6028/NIST.SP.800-161r1"
        );
    }

    #[test]
    fn index_keeps_the_source_id_as_a_prop() {
        let ids = SequentialIdGenerator::new();
        let index = build_resource_index(&[nist_ref()], &ids);
        let resources = index.back_matter.as_ref().map(|b| b.resources.clone()).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].props[0].value, "SP800-161");
        assert_eq!(index.uuid_for("SP800-161"), Some(resources[0].uuid.as_str()));
        assert!(index.uuid_for("missing").is_none());
    }

    #[test]
    fn no_references_means_no_back_matter() {
        let index = build_resource_index(&[], &SequentialIdGenerator::new());
        assert!(index.back_matter.is_none());
    }
}
