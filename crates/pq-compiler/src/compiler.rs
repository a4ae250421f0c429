use pq_core::{Character, ImageRefs, Item, Scene, World};
use pq_wiki::{ParamMap, Template, extract_templates};

use crate::diagnostics::Diagnostics;
use crate::error::CompileError;
use crate::source::ContentSource;

/// Title of the page carrying the world infobox.
pub const WORLD_PAGE: &str = "The World";
/// Category listing every scene page.
pub const SCENES_CATEGORY: &str = "Category:Scenes";
/// Category listing every character page.
pub const CHARACTERS_CATEGORY: &str = "Category:Characters";
/// Category listing every item page.
pub const ITEMS_CATEGORY: &str = "Category:Items";

/// Result of one compile run.
///
/// The world is best effort: a fatal failure mid-run still returns whatever
/// was assigned before it, so check [`CompileResult::has_errors`] before
/// treating the model as complete.
#[derive(Debug)]
pub struct CompileResult {
    /// The compiled world (may be partial if errors occurred).
    pub world: World,
    /// The diagnostic trail of the run.
    pub diagnostics: Diagnostics,
}

impl CompileResult {
    /// Returns `true` if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// The compiler orchestrator: fetches pages from a [`ContentSource`],
/// dispatches their templates to the entity compilers, and runs the image
/// resolver over the finished aggregate.
pub struct WorldCompiler<S> {
    pub(crate) source: S,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) image_refs: ImageRefs,
}

impl<S: ContentSource> WorldCompiler<S> {
    /// Create a compiler over a content source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            diagnostics: Diagnostics::new(),
            image_refs: ImageRefs::new(),
        }
    }

    /// Run one full compile pass.
    ///
    /// Any failure that escapes a category's compilation is caught here,
    /// exactly once: it is logged as fatal and the partially-built world is
    /// returned rather than discarded.
    pub fn compile(mut self) -> CompileResult {
        self.diagnostics.info("Starting compile.");
        let mut world = World::new();

        if let Err(e) = self.compile_world_page(&mut world) {
            self.fatal(&e);
        } else if let Err(e) = self.compile_categories(&mut world) {
            self.fatal(&e);
        }

        world.image_refs = std::mem::take(&mut self.image_refs);
        CompileResult {
            world,
            diagnostics: self.diagnostics,
        }
    }

    fn fatal(&mut self, error: &CompileError) {
        self.diagnostics
            .error("Fatal error during compilation: unhandled failure.");
        self.diagnostics.debug(error.to_string());
    }

    fn compile_world_page(&mut self, world: &mut World) -> Result<(), CompileError> {
        let text = self.source.fetch_page(WORLD_PAGE)?;
        for template in extract_templates(&text) {
            if template.name == "Infobox World" {
                self.apply_world_info(world, &template.params);
            }
        }
        Ok(())
    }

    /// Categories are assigned to the world one at a time, so a fatal
    /// failure in a later category keeps every earlier one.
    fn compile_categories(&mut self, world: &mut World) -> Result<(), CompileError> {
        world.scenes = self.compile_all_scenes()?;
        world.characters = self.compile_all_characters()?;
        world.items = self.compile_all_items()?;
        self.resolve_images()?;
        Ok(())
    }

    // -- World metadata --

    fn apply_world_info(&mut self, world: &mut World, params: &ParamMap) {
        world.map_name = params.get_text("map-name");
        world.image = params.get_text("image");
        self.register_image(world.image.as_deref());
        world.size = self.int_pair(params, "map-width", "map-height");
        world.pan_start = self.int_pair(params, "map-start-x", "map-start-y");
        world.zoom_start = self.int_field(params, "zoom-start");
        world.zoom_max = self.int_field(params, "zoom-max");
        world.viewport_restricted = params.get_text("viewport-restricted").as_deref() == Some("yes");
    }

    // -- Scenes --

    fn compile_all_scenes(&mut self) -> Result<Vec<Scene>, CompileError> {
        let pages = self.source.fetch_category_members(SCENES_CATEGORY)?;
        self.diagnostics
            .info(format!("Discovered {} scenes", pages.len()));
        let mut scenes = Vec::new();
        for page in pages {
            let templates = extract_templates(&page.text);
            scenes.push(self.compile_scene(&page.title, &templates));
        }
        Ok(scenes)
    }

    /// Compile one scene page. Exactly one scene comes out regardless of
    /// how many templates the page carried; unrecognized template names are
    /// incidental markup and ignored.
    fn compile_scene(&mut self, title: &str, templates: &[Template]) -> Scene {
        self.diagnostics.info(format!("Processing scene: {title}"));
        let mut scene = Scene::new();
        for template in templates {
            match template.name.as_str() {
                "Infobox Scene" => self.apply_scene_info(&mut scene, &template.params),
                "Scene Interaction" => {
                    let interaction = self.compile_interaction(&template.params);
                    scene.interactions.push(interaction);
                }
                _ => {}
            }
        }
        scene
    }

    fn apply_scene_info(&mut self, scene: &mut Scene, params: &ParamMap) {
        scene.name = params.get_text("name");

        if params.get_text("visitable").as_deref() == Some("yes") {
            scene.bg_image = params.get_text("bg-image");
            self.register_image(scene.bg_image.as_deref());
            scene.bg_size = self.int_pair(params, "bg-width", "bg-height");
            scene.indoors = Some(params.get_text_or("indoors", "no") == "yes");
        }

        if params.get_text("mapped").as_deref() == Some("yes") {
            scene.map_region = self.map_placement(params);
            scene.tooltip = params.get_text("tooltip").or_else(|| scene.name.clone());
        }
    }

    /// Map placements carry width and height directly (unlike interaction
    /// regions, which are edge-derived).
    fn map_placement(&mut self, params: &ParamMap) -> Option<pq_core::Region> {
        let x = self.int_field(params, "map-x")?;
        let y = self.int_field(params, "map-y")?;
        let width = self.int_field(params, "map-width")?;
        let height = self.int_field(params, "map-height")?;
        Some(pq_core::Region {
            x,
            y,
            width,
            height,
        })
    }

    // -- Characters --

    fn compile_all_characters(&mut self) -> Result<Vec<Character>, CompileError> {
        let pages = self.source.fetch_category_members(CHARACTERS_CATEGORY)?;
        self.diagnostics
            .info(format!("Discovered {} characters", pages.len()));
        let mut characters = Vec::new();
        for page in pages {
            let templates = extract_templates(&page.text);
            characters.push(self.compile_character(&page.title, &templates));
        }
        Ok(characters)
    }

    fn compile_character(&mut self, title: &str, templates: &[Template]) -> Character {
        self.diagnostics
            .info(format!("Processing character: {title}"));
        let mut character = Character::new();
        for template in templates {
            match template.name.as_str() {
                "Infobox Character" => {
                    let params = &template.params;
                    character.name = params.get_text("name");
                    character.tooltip = params.get_text("tooltip");
                    character.speech_color = params.get_text("speech-color");
                    character.image = params.get_text("image");
                    self.register_image(character.image.as_deref());
                }
                "Dialogue" => match self.compile_dialogue(&template.params) {
                    Ok(dialogue) => character.dialogues.push(dialogue),
                    Err(e) => self
                        .diagnostics
                        .error(format!("Skipping dialogue in \"{title}\": {e}")),
                },
                _ => {}
            }
        }
        character
    }

    // -- Items --

    fn compile_all_items(&mut self) -> Result<Vec<Item>, CompileError> {
        let pages = self.source.fetch_category_members(ITEMS_CATEGORY)?;
        self.diagnostics
            .info(format!("Discovered {} items", pages.len()));
        let mut items = Vec::new();
        for page in pages {
            let templates = extract_templates(&page.text);
            items.push(self.compile_item(&page.title, &templates));
        }
        Ok(items)
    }

    fn compile_item(&mut self, title: &str, templates: &[Template]) -> Item {
        self.diagnostics.info(format!("Processing item: {title}"));
        let mut item = Item::new();
        for template in templates {
            if template.name == "Infobox Item" {
                let params = &template.params;
                item.name = params.get_text("name");
                item.inventory_tooltip = params.get_text("inventory-tooltip");
                item.inventory_icon = params.get_text("inventory-icon");
                self.register_image(item.inventory_icon.as_deref());
            }
        }
        item
    }

    // -- Shared helpers --

    /// Register a non-empty image field into the shared reference table.
    pub(crate) fn register_image(&mut self, image: Option<&str>) {
        if let Some(name) = image {
            if !name.is_empty() {
                self.image_refs.register(name);
            }
        }
    }

    /// Parse an integer field. A missing or non-integer value is a
    /// structural error for that field alone: logged, and `None` returned
    /// so only the field's assignment is lost.
    pub(crate) fn int_field(&mut self, params: &ParamMap, key: &str) -> Option<i64> {
        match params.get_text(key) {
            None => {
                self.diagnostics
                    .error(format!("Missing integer field \"{key}\"."));
                None
            }
            Some(raw) => match raw.parse() {
                Ok(n) => Some(n),
                Err(_) => {
                    self.diagnostics
                        .error(format!("Field \"{key}\" is not an integer: \"{raw}\"."));
                    None
                }
            },
        }
    }

    /// Parse two integer fields that only make sense together.
    fn int_pair(&mut self, params: &ParamMap, a: &str, b: &str) -> Option<(i64, i64)> {
        let first = self.int_field(params, a);
        let second = self.int_field(params, b);
        Some((first?, second?))
    }
}

/// Normalize a condition: absent or empty-after-trim means catchall.
pub(crate) fn condition_text(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty())
}
