use proptest::prelude::*;

use skills_profile::forms::{AssetForm, PendingPayload};
use skills_profile::queue::PendingQueue;

fn arb_payload() -> impl Strategy<Value = PendingPayload> {
    ("[A-Za-z]{1,12}", "[a-z ]{1,24}").prop_map(|(name, description)| {
        PendingPayload::Asset(AssetForm {
            name,
            description: format!("d{description}"),
            ..AssetForm::default()
        })
    })
}

proptest! {
    #[test]
    fn add_grows_queue_and_selection(payloads in prop::collection::vec(arb_payload(), 1..20)) {
        let mut queue = PendingQueue::new();
        for (index, payload) in payloads.into_iter().enumerate() {
            let id = queue.add(payload).unwrap();
            prop_assert_eq!(queue.len(), index + 1);
            prop_assert_eq!(queue.selected_count(), index + 1);
            prop_assert_eq!(&queue.entries()[0].id, &id);
        }
    }

    #[test]
    fn removing_absent_id_changes_nothing(
        payloads in prop::collection::vec(arb_payload(), 0..10),
        absent in "[g-z]{8}",
    ) {
        let mut queue = PendingQueue::new();
        for payload in payloads {
            queue.add(payload).unwrap();
        }
        let before: Vec<String> = queue.entries().iter().map(|e| e.id.clone()).collect();
        let selected = queue.selected_count();

        prop_assert!(queue.remove(&absent).is_none());
        let after: Vec<String> = queue.entries().iter().map(|e| e.id.clone()).collect();
        prop_assert_eq!(after, before);
        prop_assert_eq!(queue.selected_count(), selected);
    }

    #[test]
    fn selection_is_subset_of_entries(
        payloads in prop::collection::vec(arb_payload(), 1..12),
        toggles in prop::collection::vec((any::<prop::sample::Index>(), any::<bool>()), 0..20),
    ) {
        let mut queue = PendingQueue::new();
        for payload in payloads {
            queue.add(payload).unwrap();
        }
        for (index, checked) in toggles {
            let id = queue.entries()[index.index(queue.len())].id.clone();
            queue.toggle_select(&id, checked);
        }
        let first = queue.entries()[0].id.clone();
        queue.remove(&first);

        prop_assert!(queue.selected_count() <= queue.len());
        for entry in queue.selected() {
            prop_assert!(queue.contains(&entry.id));
        }
        prop_assert!(!queue.is_selected(&first));
    }

    #[test]
    fn clear_all_empties_everything(payloads in prop::collection::vec(arb_payload(), 0..15)) {
        let mut queue = PendingQueue::new();
        let count = payloads.len();
        for payload in payloads {
            queue.add(payload).unwrap();
        }
        prop_assert_eq!(queue.clear_all(), count);
        prop_assert!(queue.is_empty());
        prop_assert_eq!(queue.selected_count(), 0);
    }
}
