//! Container diagnostics tests.
//!
//! These tests verify that the clamping and not-found paths of the
//! containers report through `tracing`, using an in-memory log sink.

use tessera_core::container::{Array, Array3D, List};
use tessera_core::logging::StringLogger;
use tracing::Level;

fn captured<F: FnOnce()>(f: F) -> String {
    let logger = StringLogger::new();
    tracing::subscriber::with_default(logger.subscriber(Level::TRACE), f);
    logger.contents()
}

#[test]
fn test_clamped_index_warns() {
    let array = Array::from_vec(vec![1, 2, 3]);

    let log = captured(|| {
        assert_eq!(array[10], 3);
    });

    assert!(log.contains("WARN"));
    assert!(log.contains("exceeds maximum of 3"));
}

#[test]
fn test_in_range_index_is_silent() {
    let array = Array::from_vec(vec![1, 2, 3]);

    let log = captured(|| {
        assert_eq!(array[1], 2);
        assert_eq!(array.get(7), None);
    });

    assert!(log.is_empty());
}

#[test]
fn test_empty_array_logs_error() {
    let volume = Array3D::<u8>::new(0, 0, 0);

    let log = captured(|| {
        assert!(volume.index_of(1, 2, 3).is_none());
    });

    assert!(log.contains("ERROR"));
    assert!(log.contains("array is empty"));
}

#[test]
fn test_list_diagnostics() {
    let mut list: List<&str> = ["sprite", "sound"].into_iter().collect();

    let log = captured(|| {
        assert!(!list.remove(&"font"));
        assert!(!list.insert_after(5, "font"));
    });

    assert!(log.contains("WARN"));
    assert!(log.contains("item not found"));
    assert!(log.contains("ERROR"));
    assert!(log.contains("index out of range"));
    assert_eq!(list.len(), 2);
}
