mod common;

use common::{image, EC_LISTING, USB_LISTING};
use smith_core::model::ObjectKind;

#[test]
fn repeated_queries_return_identical_ordered_results() {
    let image = image(USB_LISTING);
    let index = image.paths();

    let first: Vec<_> = index.find(ObjectKind::Device, "RHUB").into_iter().cloned().collect();
    let second: Vec<_> = index.find(ObjectKind::Device, "RHUB").into_iter().cloned().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);

    let mut sorted = first.clone();
    sorted.sort();
    assert_eq!(first, sorted);
}

#[test]
fn suffix_filter_matches_whole_segments_only() {
    let image = image(USB_LISTING);
    let index = image.paths();

    let xhc: Vec<_> = index.devices("XHC").iter().map(|p| p.path.clone()).collect();
    assert_eq!(xhc, vec!["\\_SB.PCI0.XHC".to_string()]);

    assert_eq!(index.devices("XHC1").len(), 2);
    assert_eq!(index.devices("PEG0.XHC1").len(), 1);
    assert_eq!(index.devices("\\_SB.PCI0.XHC1").len(), 1);
    assert_eq!(index.devices("xhc1.rhub").len(), 2);
    assert!(index.devices("HC1").is_empty());
}

#[test]
fn kind_filter_and_empty_suffix() {
    let image = image(EC_LISTING);
    let index = image.paths();

    assert_eq!(index.with_suffix("").len(), index.len());
    assert_eq!(index.by_kind(ObjectKind::Processor).len(), 1);
    assert!(index.methods("_STA").is_empty());
    // A name query never returns the device of the same name.
    assert!(index.names("EC0").is_empty());
    assert_eq!(index.first(ObjectKind::Name, "_ADR").map(|p| p.path.as_str()), Some("\\_SB.PCI0.LPCB._ADR"));
}
