//! Satchel Generation Pass
//!
//! Turns an inventory descriptor into the three documents the host avatar
//! consumes, and wires them into the host.
//!
//! # Pipeline
//!
//! ```text
//! descriptor ─┬─▶ allocate_parameters ─▶ parameter set (capacity entries)
//!             ├─▶ synthesize_menu ─────▶ menu (one toggle per slot)
//!             └─▶ per slot:
//!                   resolve_anim_path ─▶ slot_clip ─▶ build_toggle_layer
//!                                                         │
//!                                                controller (layers, clips, mask)
//! ```
//!
//! [`generate`] builds a [`GenerationPlan`] entirely in memory. [`commit`]
//! writes the plan through an [`AssetStore`], applies the resting-state
//! preview to the scene, and replaces the host's layer entry. A capacity
//! failure therefore never leaves partial output behind.
//!
//! # Example
//!
//! ```
//! use satchel_gen::{commit, generate, BasisDocuments, GeneratorConfig, MemoryAssetStore};
//! use satchel_spec::{AvatarDescriptor, InventoryDescriptor, InventorySlot, Scene};
//!
//! let mut scene = Scene::new().with_avatar(AvatarDescriptor::with_default_layers());
//! let root = scene.add_object("Avatar", None);
//! let hat = scene.add_object("Hat", Some(root));
//!
//! let descriptor = InventoryDescriptor::builder("0123456789abcdef0123456789abcdef")
//!     .slot(InventorySlot::new("Hat").target(hat))
//!     .build();
//!
//! let config = GeneratorConfig::default();
//! let plan = generate(&descriptor, &scene, &BasisDocuments::none(), &config).unwrap();
//!
//! let mut store = MemoryAssetStore::new();
//! let summary = commit(&plan, &mut scene, &mut store, &config).unwrap();
//! assert_eq!(summary.outputs.len(), 3);
//! assert!(summary.layer_replaced);
//! ```

pub mod bundle;
pub mod clip;
pub mod config;
pub mod error;
pub mod generate;
pub mod integrate;
pub mod layer;
pub mod menu;
pub mod params;
pub mod path;
pub mod store;
pub mod template;

pub use bundle::GeneratedBundle;
pub use clip::{apply_preview, slot_clip, synthesize_clip, PreviewEdit};
pub use config::{GeneratorConfig, MissingLayerPolicy};
pub use error::{CodedError, GenError, GenResult, StoreError};
pub use generate::{generate, GenerationPlan};
pub use integrate::{attach_to_host, commit, CommitSummary};
pub use layer::{build_toggle_layer, exclusion_mask};
pub use menu::synthesize_menu;
pub use params::allocate_parameters;
pub use path::resolve_anim_path;
pub use store::{encode_document, load_document, AssetFile, AssetStore, FsAssetStore, MemoryAssetStore};
pub use template::{BasisDocuments, Template};
