//! # Walker Properties
//!
//! Property tests over generated collections: every element is visited
//! exactly once, in order, under its index or key.

use std::collections::{BTreeMap, HashMap};

use proptest::prelude::*;
use tagval_core::{structure, Traverse, Walker};

fn visited_paths(value: &dyn Traverse) -> Vec<String> {
    let mut paths = Vec::new();
    Walker::default()
        .walk(value, |visit| -> Result<(), ()> {
            paths.push(visit.path.to_string());
            Ok(())
        })
        .unwrap();
    paths
}

struct Holder {
    items: Vec<String>,
}

structure!(Holder {
    items => { json: "Items" },
});

proptest! {
    #[test]
    fn sequence_elements_are_visited_by_index(items in prop::collection::vec(".{0,8}", 0..16)) {
        let paths = visited_paths(&items);
        prop_assert_eq!(paths.len(), items.len() + 1);
        prop_assert_eq!(&paths[0], "");
        for (index, path) in paths.iter().skip(1).enumerate() {
            prop_assert_eq!(path, &index.to_string());
        }
    }

    #[test]
    fn hash_map_entries_are_visited_in_key_order(entries in prop::collection::hash_map("[a-z]{1,6}", any::<u32>(), 0..12)) {
        let map: HashMap<String, u32> = entries;
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        let paths = visited_paths(&map);
        prop_assert_eq!(&paths[1..], &keys[..]);

        let ordered: BTreeMap<String, u32> = map.into_iter().collect();
        prop_assert_eq!(visited_paths(&ordered), paths);
    }

    #[test]
    fn struct_fields_prefix_their_children(items in prop::collection::vec("[a-z]{0,4}", 0..8)) {
        let holder = Holder { items };
        let paths = visited_paths(&holder);
        prop_assert_eq!(&paths[1], "Items");
        prop_assert!(paths.iter().skip(2).all(|p| p.starts_with("Items.")));
        prop_assert_eq!(paths.len(), holder.items.len() + 2);
    }

    #[test]
    fn rendering_an_option_matches_its_pointee(value in any::<i64>()) {
        prop_assert_eq!(Some(value).render(), value.to_string());
        prop_assert_eq!(Some(Box::new(value)).render(), value.to_string());
    }
}
