//! Shared fixture types for workspace tests.

use std::any::Any;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use lookup::engine::{
	ContextExtension, ContextExtensionManager, Descriptor, DescriptorIdentity, Fault, Object, ParameterInfo, Redirector, Reflect, Resolution, Resolver,
	TypeInfo, Variants, default_type_resolver, evaluated, object,
};

/// Description attached by [`ResolverDescriptor`].
pub const RESOLVED_DESCRIPTION: &str = "Resolved by descriptor";

/// Value substituted by [`RedirectionDescriptor`].
pub const REDIRECTED_VALUE: i32 = 69;

/// Object with two public fields and one property.
#[derive(Debug, Clone)]
pub struct FieldsFixture {
	/// First stored value.
	pub first: i32,
	/// Second stored value.
	pub second: String,
}

impl Reflect for FieldsFixture {
	fn type_info(&self) -> TypeInfo {
		static INFO: OnceLock<TypeInfo> = OnceLock::new();
		INFO.get_or_init(|| {
			TypeInfo::builder::<FieldsFixture>("FieldsFixture")
				.field("first", |fixture: &FieldsFixture| evaluated(fixture.first))
				.field("second", |fixture: &FieldsFixture| evaluated(fixture.second.clone()))
				.property("summary", |fixture: &FieldsFixture| evaluated(format!("{}:{}", fixture.first, fixture.second)))
				.build()
		})
		.clone()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Object whose only member is a method that needs an argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedFixture;

impl Reflect for UnsupportedFixture {
	fn type_info(&self) -> TypeInfo {
		static INFO: OnceLock<TypeInfo> = OnceLock::new();
		INFO.get_or_init(|| {
			TypeInfo::builder::<UnsupportedFixture>("UnsupportedFixture")
				.method_with("unsupported_method", vec![ParameterInfo::required("value", "i32")], |_: &UnsupportedFixture, _| {
					Err(Fault::unsupported("unsupported_method needs a caller-supplied value"))
				})
				.build()
		})
		.clone()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Descriptor that supplies `unsupported_method` itself.
pub struct ResolverDescriptor {
	identity: DescriptorIdentity,
}

impl ResolverDescriptor {
	/// Describe `value`.
	pub fn new(value: &dyn Reflect) -> Self {
		Self {
			identity: DescriptorIdentity::of(value),
		}
	}
}

impl<C> Descriptor<C> for ResolverDescriptor {
	fn identity(&self) -> &DescriptorIdentity {
		&self.identity
	}

	fn as_resolver(&self) -> Option<&dyn Resolver> {
		Some(self)
	}
}

impl Resolver for ResolverDescriptor {
	fn resolve(&self, target: &str, _parameters: &[ParameterInfo]) -> Option<Resolution<'_>> {
		match target {
			"unsupported_method" => Some(Box::new(|| Variants::described(42_i32, RESOLVED_DESCRIPTION))),
			_ => None,
		}
	}
}

/// Resolver mapping [`UnsupportedFixture`] to [`ResolverDescriptor`].
pub fn resolve_unsupported<C>(value: Option<&Object>, static_type: Option<&TypeInfo>) -> Box<dyn Descriptor<C>> {
	match value {
		Some(item) if matches_exact::<UnsupportedFixture>(item, static_type) => Box::new(ResolverDescriptor::new(item.as_ref())),
		_ => default_type_resolver(value, static_type),
	}
}

/// Object with a property whose accessor counts its invocations.
#[derive(Debug, Default)]
pub struct RedirectionFixture {
	/// Text returned by the `property` accessor.
	pub property: String,
	reads: AtomicUsize,
}

impl RedirectionFixture {
	/// Fixture returning `property`.
	pub fn new(property: &str) -> Self {
		Self {
			property: property.to_owned(),
			reads: AtomicUsize::new(0),
		}
	}

	/// Times the `property` accessor ran.
	pub fn reads(&self) -> usize {
		self.reads.load(Ordering::SeqCst)
	}
}

impl Reflect for RedirectionFixture {
	fn type_info(&self) -> TypeInfo {
		static INFO: OnceLock<TypeInfo> = OnceLock::new();
		INFO.get_or_init(|| {
			TypeInfo::builder::<RedirectionFixture>("RedirectionFixture")
				.property("property", |fixture: &RedirectionFixture| {
					fixture.reads.fetch_add(1, Ordering::SeqCst);
					evaluated(fixture.property.clone())
				})
				.build()
		})
		.clone()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Descriptor substituting `property` with [`REDIRECTED_VALUE`].
pub struct RedirectionDescriptor {
	identity: DescriptorIdentity,
}

impl<C> Descriptor<C> for RedirectionDescriptor {
	fn identity(&self) -> &DescriptorIdentity {
		&self.identity
	}

	fn as_redirector(&self) -> Option<&dyn Redirector> {
		Some(self)
	}
}

impl Redirector for RedirectionDescriptor {
	fn try_redirect(&self, target: &str) -> Option<Object> {
		(target == "property").then(|| object(REDIRECTED_VALUE))
	}
}

/// Resolver mapping [`RedirectionFixture`] to [`RedirectionDescriptor`].
pub fn resolve_redirection<C>(value: Option<&Object>, static_type: Option<&TypeInfo>) -> Box<dyn Descriptor<C>> {
	match value {
		Some(item) if matches_exact::<RedirectionFixture>(item, static_type) => Box::new(RedirectionDescriptor {
			identity: DescriptorIdentity::of(item.as_ref()),
		}),
		_ => default_type_resolver(value, static_type),
	}
}

/// Caller context threaded through context-aware capabilities.
#[derive(Debug, Clone)]
pub struct EngineContext {
	/// Context version.
	pub version: i32,
	/// Free-form context text.
	pub metadata: String,
}

impl Default for EngineContext {
	fn default() -> Self {
		Self {
			version: 1,
			metadata: "Test context".to_owned(),
		}
	}
}

/// Object whose descriptor adds members computed from [`EngineContext`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextFixture;

impl Reflect for ContextFixture {
	fn type_info(&self) -> TypeInfo {
		static INFO: OnceLock<TypeInfo> = OnceLock::new();
		INFO.get_or_init(|| {
			TypeInfo::builder::<ContextFixture>("ContextFixture")
				.property("label", |_: &ContextFixture| evaluated("context fixture".to_owned()))
				.build()
		})
		.clone()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Descriptor registering `version` and `metadata` context extensions.
pub struct ContextDescriptor {
	identity: DescriptorIdentity,
}

impl Descriptor<EngineContext> for ContextDescriptor {
	fn identity(&self) -> &DescriptorIdentity {
		&self.identity
	}

	fn as_context_extension(&self) -> Option<&dyn ContextExtension<EngineContext>> {
		Some(self)
	}
}

impl ContextExtension<EngineContext> for ContextDescriptor {
	fn register_extensions<'a>(&'a self, manager: &mut ContextExtensionManager<'a, EngineContext>) {
		manager
			.register("version", |context: &EngineContext| Variants::value(context.version))
			.register("metadata", |context: &EngineContext| Variants::value(context.metadata.clone()));
	}
}

/// Resolver mapping [`ContextFixture`] to [`ContextDescriptor`].
pub fn resolve_context(value: Option<&Object>, static_type: Option<&TypeInfo>) -> Box<dyn Descriptor<EngineContext>> {
	match value {
		Some(item) if matches_exact::<ContextFixture>(item, static_type) => Box::new(ContextDescriptor {
			identity: DescriptorIdentity::of(item.as_ref()),
		}),
		_ => default_type_resolver(value, static_type),
	}
}

/// Base record embedded in [`InventoryItem`].
#[derive(Debug, Clone)]
pub struct Record {
	/// Record id.
	pub id: u64,
	/// Author of the record.
	pub created_by: String,
}

impl Reflect for Record {
	fn type_info(&self) -> TypeInfo {
		record_type()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

fn record_type() -> TypeInfo {
	static INFO: OnceLock<TypeInfo> = OnceLock::new();
	INFO.get_or_init(|| {
		TypeInfo::builder::<Record>("Record")
			.property("id", |record: &Record| evaluated(record.id))
			.property("created_by", |record: &Record| evaluated(record.created_by.clone()))
			.build()
	})
	.clone()
}

/// Object exercising every member kind and modifier, with a base type.
#[derive(Debug, Clone)]
pub struct InventoryItem {
	/// Embedded base record.
	pub record: Record,
	/// Item name.
	pub name: String,
	/// Units in stock.
	pub quantity: i64,
	/// Free-form tags.
	pub tags: Vec<Option<Object>>,
	/// Names of `on_restock` subscribers.
	pub subscribers: Vec<Option<Object>>,
	secret: String,
}

impl InventoryItem {
	/// Sample item with two tags and one subscriber.
	pub fn sample() -> Self {
		Self {
			record: Record {
				id: 7,
				created_by: "warehouse".to_owned(),
			},
			name: "bolt".to_owned(),
			quantity: 40,
			tags: vec![Some(object("steel".to_owned())), Some(object("m8".to_owned()))],
			subscribers: vec![Some(object("audit".to_owned()))],
			secret: "s3cr3t".to_owned(),
		}
	}
}

fn record_of(item: &InventoryItem) -> &Record {
	&item.record
}

impl Reflect for InventoryItem {
	fn type_info(&self) -> TypeInfo {
		static INFO: OnceLock<TypeInfo> = OnceLock::new();
		INFO.get_or_init(|| {
			TypeInfo::builder::<InventoryItem>("InventoryItem")
				.base(record_type(), record_of)
				.property("name", |item: &InventoryItem| evaluated(item.name.clone()))
				.property("quantity", |item: &InventoryItem| evaluated(item.quantity))
				.method("describe", |item: &InventoryItem| evaluated(format!("{} x{}", item.name, item.quantity)))
				.method_with("restock", vec![ParameterInfo::required("amount", "i64")], |item: &InventoryItem, _| {
					evaluated(item.quantity)
				})
				.method("sync", |_: &InventoryItem| Err(Fault::evaluation("warehouse offline")))
				.field("tags", |item: &InventoryItem| evaluated(item.tags.clone()))
				.field("secret", |item: &InventoryItem| evaluated(item.secret.clone()))
				.private()
				.property("checksum", |item: &InventoryItem| evaluated(item.secret.len() as i64 + item.quantity))
				.private()
				.method("default_quantity", |_: &InventoryItem| evaluated(1_i64))
				.static_member()
				.event("on_restock", |item: &InventoryItem| evaluated(item.subscribers.clone()))
				.build()
		})
		.clone()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn display(&self) -> String {
		self.name.clone()
	}
}

fn matches_exact<T: Reflect>(value: &Object, static_type: Option<&TypeInfo>) -> bool {
	value.as_any().is::<T>() && static_type.is_none_or(|info| info.is::<T>())
}
