//! Tag index.

use std::collections::BTreeMap;

use spritepack_spec::{AnimationDescriptor, TagRecord};

/// Tag -> animation names, tags in lexicographic order.
pub type TagIndex = BTreeMap<String, TagRecord>;

/// Groups animation names by tag, keeping encounter order within a tag.
pub fn index_tags<'a, I>(descriptors: I) -> TagIndex
where
    I: IntoIterator<Item = &'a AnimationDescriptor>,
{
    let mut index = TagIndex::new();
    for descriptor in descriptors {
        index
            .entry(descriptor.tag.clone())
            .or_default()
            .push(descriptor.name.clone());
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_groups_in_encounter_order() {
        let descriptors = vec![
            AnimationDescriptor::new("walk_right", "hero").with_tag("walk"),
            AnimationDescriptor::new("idle", "hero").with_tag("rest"),
            AnimationDescriptor::new("walk_left", "hero").with_tag("walk"),
            AnimationDescriptor::new("sparkle", "fx"),
        ];

        let index = index_tags(&descriptors);
        let tags: Vec<&str> = index.keys().map(String::as_str).collect();
        assert_eq!(tags, vec!["", "rest", "walk"]);
        assert_eq!(index["walk"], vec!["walk_right", "walk_left"]);
        assert_eq!(index[""], vec!["sparkle"]);

        let total: usize = index.values().map(Vec::len).sum();
        assert_eq!(total, descriptors.len());
    }

    #[test]
    fn test_duplicates_are_appended() {
        let descriptors = vec![
            AnimationDescriptor::new("walk", "a").with_tag("move"),
            AnimationDescriptor::new("walk", "b").with_tag("move"),
        ];
        assert_eq!(index_tags(&descriptors)["move"], vec!["walk", "walk"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(index_tags(&Vec::<AnimationDescriptor>::new()).is_empty());
    }
}
