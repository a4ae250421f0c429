//! Core types for Pagequest: the compiled game world model.
//!
//! This crate defines the data model that the wiki compiler produces. It is
//! independent of the markup parser — you can construct a [`World`]
//! programmatically or serialize one straight to JSON for the game client.
//!
//! The command and dialogue event types are closed enums tagged with `event`
//! on the wire, so a client switching on the tag sees exactly the variants
//! defined here and nothing else.

/// Characters and their dialogue trees.
pub mod character;
/// Image reference accumulator shared across a compile run.
pub mod image;
/// Inventory items.
pub mod item;
/// Scenes, interactions, states, actions, and commands.
pub mod scene;
/// The top-level world aggregate.
pub mod world;

/// Re-export character and dialogue types.
pub use character::{Character, Dialogue, DialogueEvent, DialogueOption};
/// Re-export the image reference accumulator.
pub use image::ImageRefs;
/// Re-export the item type.
pub use item::Item;
/// Re-export scene types.
pub use scene::{Action, ActionMapping, Command, InteractionState, Region, Scene, SceneInteraction};
/// Re-export the world aggregate.
pub use world::World;
