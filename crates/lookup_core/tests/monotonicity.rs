#![allow(missing_docs)]

use lookup::engine::{DecomposeOptions, MemberAttributes, decompose, object};
use lookup_testkit::InventoryItem;

fn member_count(options: &DecomposeOptions) -> usize {
	decompose(Some(object(InventoryItem::sample())), options).expect("item decomposes").members().len()
}

fn assert_grows(switch: fn(&mut DecomposeOptions), label: &str) {
	let baseline = member_count(&DecomposeOptions::default());
	let mut options = DecomposeOptions::default();
	switch(&mut options);
	let count = member_count(&options);
	assert!(count > baseline, "{label}: {count} members, baseline {baseline}");
}

#[test]
fn fields_add_members() {
	assert_grows(|options| options.include_fields = true, "include_fields");
}

#[test]
fn private_members_add_members() {
	assert_grows(|options| options.include_private_members = true, "include_private_members");
}

#[test]
fn unsupported_members_add_members() {
	assert_grows(|options| options.include_unsupported = true, "include_unsupported");
}

#[test]
fn root_adds_members() {
	assert_grows(|options| options.include_root = true, "include_root");
}

#[test]
fn static_members_add_members() {
	assert_grows(|options| options.include_static_members = true, "include_static_members");
}

#[test]
fn events_add_members() {
	assert_grows(|options| options.include_events = true, "include_events");
}

#[test]
fn inspection_preset_is_a_superset() {
	let default = decompose(Some(object(InventoryItem::sample())), &DecomposeOptions::default()).expect("item decomposes");
	let full = decompose(Some(object(InventoryItem::sample())), &DecomposeOptions::for_inspection(())).expect("item decomposes");

	for member in default.members() {
		assert!(full.member(member.name()).is_some(), "{} missing from inspection", member.name());
	}

	let sync = full.member("sync").expect("faulted member present");
	assert!(sync.is_unsupported());
	assert!(sync.value().description().is_some_and(|text| text.contains("warehouse offline")));

	let created_by = full.member("created_by").expect("base member present");
	assert_eq!(created_by.declaring_type_name(), "Record");
	assert!(created_by.depth() < full.member("name").expect("own member present").depth());

	let on_restock = full.member("on_restock").expect("event present");
	assert_eq!(on_restock.attributes(), MemberAttributes::EVENT);
	assert!(on_restock.value().is_expandable());
}

#[test]
fn diagnostics_are_recorded_for_every_member() {
	let full = decompose(Some(object(InventoryItem::sample())), &DecomposeOptions::for_inspection(())).expect("item decomposes");
	assert!(!full.members().is_empty());
	// Without an allocation counter the byte count stays at zero.
	assert!(full.members().iter().all(|member| member.allocated_bytes() == 0));
}
