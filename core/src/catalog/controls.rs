use super::backmatter::ResourceIndex;
use crate::gemara::{Category, Guideline, GuidelinePart};
use crate::oscal::common::non_empty;
use crate::oscal::{Control, Group, Link, Part};
use std::collections::HashMap;
use tracing::{debug, warn};

pub fn category_to_group(category: &Category, resources: &ResourceIndex) -> Group {
    let converted: Vec<(Control, Option<&str>)> = category
        .guidelines
        .iter()
        .map(|guideline| (guideline_to_control(guideline, resources), guideline.parent_id()))
        .collect();

    Group {
        id: non_empty(&category.id),
        title: category.title.clone(),
        props: Vec::new(),
        controls: nest_controls(&category.id, converted),
    }
}

/// Attaches every control under its parent, wherever the parent appears in
/// the category. Children of a parent outside the category, and members of
/// parent cycles, stay top-level.
fn nest_controls(category_id: &str, converted: Vec<(Control, Option<&str>)>) -> Vec<Control> {
    let mut index: HashMap<String, usize> = HashMap::new();
    for (i, (control, _)) in converted.iter().enumerate() {
        index.entry(control.id.clone()).or_insert(i);
    }

    let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();
    for (i, (control, parent)) in converted.iter().enumerate() {
        match parent.and_then(|p| index.get(p).copied()) {
            Some(p) if p != i => children.entry(p).or_default().push(i),
            Some(_) => roots.push(i),
            None => {
                if let Some(parent) = parent {
                    warn!(
                        category = category_id,
                        control = %control.id,
                        parent,
                        "parent guideline not in category, keeping control top-level"
                    );
                }
                roots.push(i);
            }
        }
    }

    let mut slots: Vec<Option<Control>> = converted.into_iter().map(|(c, _)| Some(c)).collect();
    let mut out = Vec::with_capacity(roots.len());
    for root in roots {
        if let Some(control) = assemble(root, &mut slots, &children) {
            out.push(control);
        }
    }

    for i in 0..slots.len() {
        if slots[i].is_some() {
            if let Some(control) = assemble(i, &mut slots, &children) {
                warn!(
                    category = category_id,
                    control = %control.id,
                    "guideline nesting forms a cycle, keeping control top-level"
                );
                out.push(control);
            }
        }
    }
    debug!(category = category_id, controls = out.len(), "nested category controls");
    out
}

fn assemble(
    i: usize,
    slots: &mut [Option<Control>],
    children: &HashMap<usize, Vec<usize>>,
) -> Option<Control> {
    let mut control = slots[i].take()?;
    if let Some(kids) = children.get(&i) {
        for &kid in kids {
            if let Some(child) = assemble(kid, slots, children) {
                control.controls.push(child);
            }
        }
    }
    Some(control)
}

pub fn guideline_to_control(guideline: &Guideline, resources: &ResourceIndex) -> Control {
    let mut links: Vec<Link> = guideline
        .see_also
        .iter()
        .map(|also| Link::fragment(also, "related"))
        .collect();
    for external in &guideline.external_references {
        match resources.uuid_for(external) {
            Some(uuid) => links.push(Link::fragment(uuid, "reference")),
            None => warn!(
                guideline = %guideline.id,
                reference = %external,
                "external reference has no resource, skipping link"
            ),
        }
    }

    let objective = Part {
        id: Some(format!("{}_obj", guideline.id)),
        name: "assessment-objective".to_string(),
        prose: non_empty(&guideline.objective),
        ..Part::default()
    };
    let statement = Part {
        id: Some(format!("{}_smt", guideline.id)),
        name: "statement".to_string(),
        parts: guideline
            .guideline_parts
            .iter()
            .map(|part| sub_statement(&guideline.id, part))
            .collect(),
        ..Part::default()
    };

    let mut parts = vec![objective, statement];
    if !guideline.recommendations.is_empty() {
        parts.push(Part {
            id: Some(format!("{}_gdn", guideline.id)),
            name: "guidance".to_string(),
            prose: Some(guideline.recommendations.join(" ")),
            ..Part::default()
        });
    }

    Control {
        id: guideline.id.clone(),
        title: guideline.title.clone(),
        props: Vec::new(),
        links,
        parts,
        controls: Vec::new(),
    }
}

fn sub_statement(guideline_id: &str, part: &GuidelinePart) -> Part {
    let id = format!("{}_smt.{}", guideline_id, part.id);
    let guidance = if part.recommendations.is_empty() {
        Vec::new()
    } else {
        vec![Part {
            id: Some(format!("{}_gdn", id)),
            name: "guidance".to_string(),
            prose: Some(part.recommendations.join(" ")),
            ..Part::default()
        }]
    };
    Part {
        id: Some(id),
        name: "item".to_string(),
        title: non_empty(&part.title),
        prose: non_empty(&part.prose),
        props: Vec::new(),
        parts: guidance,
    }
}
