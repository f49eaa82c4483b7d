//! Satchel Inventory Document Library
//!
//! This crate provides the types, validation, and hashing behind Satchel
//! inventory descriptors and the avatar documents a generation run produces.
//!
//! # Overview
//!
//! An inventory descriptor lists *slots*: named groups of scene objects the
//! wearer can show or hide from a menu. Generating a descriptor yields three
//! documents that must stay mutually consistent:
//!
//! - an **expression parameter set** of fixed length ([`PARAMETER_CAPACITY`]),
//! - an **expressions menu** with one toggle per slot,
//! - an **animator controller** with one two-state layer per slot.
//!
//! # Example
//!
//! ```
//! use satchel_spec::{InventoryDescriptor, InventorySlot, ObjectId};
//! use satchel_spec::validation::validate_descriptor;
//! use satchel_spec::hash::canonical_descriptor_hash;
//!
//! let descriptor = InventoryDescriptor::builder("0123456789abcdef0123456789abcdef")
//!     .slot(InventorySlot::new("Hat").icon("icons/hat.png").target(ObjectId(3)))
//!     .slot(InventorySlot::new("Scarf").target(ObjectId(4)).start_enabled(true))
//!     .build();
//!
//! let result = validate_descriptor(&descriptor);
//! assert!(result.is_ok());
//!
//! let hash = canonical_descriptor_hash(&descriptor).unwrap();
//! println!("Descriptor hash: {}", hash);
//! ```
//!
//! # Modules
//!
//! - [`avatar`]: Host avatar record and its playable layer slots
//! - [`controller`]: Animator controller, state machine, clip and mask documents
//! - [`descriptor`]: Inventory descriptor type and builder
//! - [`error`]: Error and warning types for validation
//! - [`hash`]: Canonical hashing
//! - [`menu`]: Expressions menu documents
//! - [`output`]: Generated artifact kinds and layout
//! - [`params`]: Expression parameter documents
//! - [`report`]: Report types and builder for generation results
//! - [`scene`]: Scene hierarchy
//! - [`validation`]: Descriptor validation functions

pub mod avatar;
pub mod controller;
pub mod descriptor;
pub mod error;
pub mod hash;
pub mod menu;
pub mod output;
pub mod params;
pub mod report;
pub mod scene;
pub mod validation;

// Re-export commonly used types at the crate root
pub use avatar::{AnimLayerType, AvatarDescriptor, CustomAnimLayer};
pub use controller::{
    AnimationClip, AnimatorController, AnimatorState, AvatarMask, BodyPart, ConditionMode,
    ControllerLayer, ControllerParameter, ControllerParameterType, CurveBinding, Keyframe,
    StateMachine, StateTransition, TransitionCondition,
};
pub use descriptor::{
    new_descriptor_id, BasisRefs, DescriptorBuilder, InventoryDescriptor, InventorySlot,
    DESCRIPTOR_VERSION,
};
pub use error::{
    ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use hash::{canonical_descriptor_hash, canonical_document_hash};
pub use menu::{ControlType, ExpressionsMenu, MenuControl, MENU_CONTROL_LIMIT};
pub use output::{OutputKind, OutputLayout, DEFAULT_GENERATED_ROOT};
pub use params::{
    slot_parameter_name, ExpressionParameters, Parameter, ValueType, PARAMETER_CAPACITY,
};
pub use report::{OutputResult, Report, ReportBuilder, ReportError, ReportWarning, REPORT_VERSION};
pub use scene::{ObjectId, Scene, SceneObject};
pub use validation::{
    is_safe_asset_path, is_valid_descriptor_id, validate_descriptor, validate_for_generate,
    GenerateContext,
};
