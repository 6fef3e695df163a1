//! Layout Planner: partitions a type's fields into ordered placement groups.
//!
//! Explicit layout items claim fields by name and always take priority;
//! anything left unclaimed trails in declaration order as an implicit
//! vertical group that is rendered without a wrapping container.

use crate::domain::{FieldDescriptor, LayoutItem, Orientation};
use std::collections::HashSet;

/// One placement group produced by [`plan`].
#[derive(Debug)]
pub enum PlacementGroup<'a> {
    /// A container declared by a layout item, wrapping its fields.
    Explicit {
        orientation: Orientation,
        fields: Vec<&'a FieldDescriptor>,
    },
    /// The trailing fields not claimed by any item, in declaration order.
    Implicit { fields: Vec<&'a FieldDescriptor> },
}

/// Partition `fields` according to `layout`. Every field is placed exactly
/// once. Layout names with no matching descriptor are skipped silently.
pub fn plan<'a>(
    fields: &'a [FieldDescriptor],
    layout: Option<&[LayoutItem]>,
) -> Vec<PlacementGroup<'a>> {
    let items = match layout {
        Some(items) if !items.is_empty() => items,
        _ => {
            return vec![PlacementGroup::Implicit {
                fields: fields.iter().collect(),
            }]
        }
    };

    let mut claimed: HashSet<&str> = HashSet::new();
    let mut groups = Vec::with_capacity(items.len() + 1);

    for item in items {
        let mut group_fields = Vec::with_capacity(item.fields.len());
        for name in &item.fields {
            if claimed.contains(name.as_str()) {
                continue;
            }
            if let Some(field) = fields.iter().find(|f| &f.name == name) {
                claimed.insert(field.name.as_str());
                group_fields.push(field);
            }
        }
        groups.push(PlacementGroup::Explicit {
            orientation: item.orientation,
            fields: group_fields,
        });
    }

    let remaining: Vec<&FieldDescriptor> = fields
        .iter()
        .filter(|f| !claimed.contains(f.name.as_str()))
        .collect();
    if !remaining.is_empty() {
        groups.push(PlacementGroup::Implicit { fields: remaining });
    }

    groups
}
