//! Turning parsed documents into panes and GUIs.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use horizon_inventory_core::logging::{span_names, targets};
use horizon_inventory_core::{
    Alignment, Error, ItemStack, Mask, Orientation, Pattern, PerfSpan, Result, Slot,
};

use super::{XmlElement, parse_bool, parse_document};
use crate::gui::{ChestGui, CloseAction};
use crate::item::{ClickAction, GuiItem, PropertyValue};
use crate::pane::{
    CycleButton, MasonryPane, OutlinePane, PaginatedPane, PagingButtons, Pane, PatternPane,
    PercentageBar, Priority, SharedPane, Slider, StaticPane, ToggleButton, share,
};

/// Hook run on a pane carrying a `populate` attribute.
///
/// A populated pane's children are not loaded from the document; the hook
/// fills the pane instead.
pub type PopulateHook = Arc<dyn Fn(&mut dyn Pane) -> Result<()> + Send + Sync>;

/// Parser turning the text of a `<property>` into a typed value.
pub type PropertyParser = Arc<dyn Fn(&str) -> Result<PropertyValue> + Send + Sync>;

/// Loader building a pane from its element.
pub type PaneLoader =
    Arc<dyn Fn(&mut LoadSession<'_>, &XmlElement) -> Result<SharedPane> + Send + Sync>;

// ============================================================================
// PaneRegistry
// ============================================================================

/// Maps pane element names to their loaders.
#[derive(Clone)]
pub struct PaneRegistry {
    loaders: HashMap<String, PaneLoader>,
}

impl PaneRegistry {
    /// A registry knowing every built-in pane.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.insert("outlinepane", load_outline_pane);
        registry.insert("staticpane", load_static_pane);
        registry.insert("patternpane", load_pattern_pane);
        registry.insert("paginatedpane", load_paginated_pane);
        registry.insert("masonrypane", load_masonry_pane);
        registry.insert("percentagebar", load_percentage_bar);
        registry.insert("slider", load_slider);
        registry.insert("togglebutton", load_toggle_button);
        registry.insert("cyclebutton", load_cycle_button);
        registry.insert("pagingbuttons", load_paging_buttons);
        registry
    }

    /// A registry without any loader.
    pub fn empty() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// Register a loader for `name`.
    ///
    /// Fails when the name is taken.
    pub fn register<F>(&mut self, name: impl Into<String>, loader: F) -> Result<()>
    where
        F: Fn(&mut LoadSession<'_>, &XmlElement) -> Result<SharedPane> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.loaders.contains_key(&name) {
            return Err(Error::precondition(format!(
                "pane '{name}' is already registered"
            )));
        }
        self.insert(name, loader);
        Ok(())
    }

    fn insert<F>(&mut self, name: impl Into<String>, loader: F)
    where
        F: Fn(&mut LoadSession<'_>, &XmlElement) -> Result<SharedPane> + Send + Sync + 'static,
    {
        self.loaders.insert(name.into(), Arc::new(loader));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loaders.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&PaneLoader> {
        self.loaders.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.loaders.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for PaneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PaneRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

// ============================================================================
// LoadContext
// ============================================================================

/// The names a document may refer to, and the panes it may contain.
///
/// A context is configured once and can load any number of documents.
#[derive(Clone)]
pub struct LoadContext {
    actions: HashMap<String, ClickAction>,
    close_actions: HashMap<String, CloseAction>,
    populate_hooks: HashMap<String, PopulateHook>,
    properties: HashMap<String, PropertyParser>,
    panes: PaneRegistry,
}

impl LoadContext {
    /// A context with the built-in panes and property types and no actions.
    pub fn new() -> Self {
        let mut properties: HashMap<String, PropertyParser> = HashMap::new();
        properties.insert("boolean".into(), Arc::new(|text: &str| {
            parse_bool(text)
                .map(PropertyValue::Boolean)
                .ok_or_else(|| invalid_property("boolean", text))
        }));
        properties.insert("byte".into(), Arc::new(|text: &str| {
            parse_number(text, "byte").map(PropertyValue::Byte)
        }));
        properties.insert("character".into(), Arc::new(|text: &str| {
            single_char(text)
                .map(PropertyValue::Character)
                .ok_or_else(|| invalid_property("character", text))
        }));
        properties.insert("double".into(), Arc::new(|text: &str| {
            parse_number(text, "double").map(PropertyValue::Double)
        }));
        properties.insert("float".into(), Arc::new(|text: &str| {
            parse_number(text, "float").map(PropertyValue::Float)
        }));
        properties.insert("integer".into(), Arc::new(|text: &str| {
            parse_number(text, "integer").map(PropertyValue::Integer)
        }));
        properties.insert("long".into(), Arc::new(|text: &str| {
            parse_number(text, "long").map(PropertyValue::Long)
        }));
        properties.insert("short".into(), Arc::new(|text: &str| {
            parse_number(text, "short").map(PropertyValue::Short)
        }));
        properties.insert("string".into(), Arc::new(|text: &str| {
            Ok(PropertyValue::String(text.to_string()))
        }));

        Self {
            actions: HashMap::new(),
            close_actions: HashMap::new(),
            populate_hooks: HashMap::new(),
            properties,
            panes: PaneRegistry::new(),
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Make `action` available to `onClick` style attributes as `name`.
    ///
    /// Returns the action previously registered under the name.
    pub fn register_action(
        &mut self,
        name: impl Into<String>,
        action: ClickAction,
    ) -> Option<ClickAction> {
        self.actions.insert(name.into(), action)
    }

    /// Make `action` available to the `onClose` attribute as `name`.
    pub fn register_close_action(
        &mut self,
        name: impl Into<String>,
        action: CloseAction,
    ) -> Option<CloseAction> {
        self.close_actions.insert(name.into(), action)
    }

    /// Make `hook` available to `populate` attributes as `name`.
    pub fn register_populate<F>(&mut self, name: impl Into<String>, hook: F)
    where
        F: Fn(&mut dyn Pane) -> Result<()> + Send + Sync + 'static,
    {
        self.populate_hooks.insert(name.into(), Arc::new(hook));
    }

    /// Register a property type usable as `<property type="name">`.
    ///
    /// Fails when the type is taken, including by a built-in type.
    pub fn register_property<F>(&mut self, name: impl Into<String>, parser: F) -> Result<()>
    where
        F: Fn(&str) -> Result<PropertyValue> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.properties.contains_key(&name) {
            return Err(Error::precondition(format!(
                "property '{name}' is already registered"
            )));
        }
        self.properties.insert(name, Arc::new(parser));
        Ok(())
    }

    /// Register a custom pane element.
    pub fn register_pane<F>(&mut self, name: impl Into<String>, loader: F) -> Result<()>
    where
        F: Fn(&mut LoadSession<'_>, &XmlElement) -> Result<SharedPane> + Send + Sync + 'static,
    {
        self.panes.register(name, loader)
    }

    pub fn panes(&self) -> &PaneRegistry {
        &self.panes
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// The action registered as `name`.
    pub fn action(&self, name: &str) -> Result<ClickAction> {
        self.actions
            .get(name)
            .cloned()
            .ok_or_else(|| Error::reflection(format!("no action is registered as '{name}'")))
    }

    /// The close action registered as `name`.
    pub fn close_action(&self, name: &str) -> Result<CloseAction> {
        self.close_actions
            .get(name)
            .cloned()
            .ok_or_else(|| Error::reflection(format!("no close action is registered as '{name}'")))
    }

    /// The population hook registered as `name`.
    pub fn populate_hook(&self, name: &str) -> Result<PopulateHook> {
        self.populate_hooks
            .get(name)
            .cloned()
            .ok_or_else(|| Error::reflection(format!("no populate hook is registered as '{name}'")))
    }

    /// Parse `text` as a property of type `kind`.
    pub fn parse_property(&self, kind: &str, text: &str) -> Result<PropertyValue> {
        let parser = self
            .properties
            .get(kind)
            .ok_or_else(|| Error::load(format!("unknown property type '{kind}'")))?;
        parser(text)
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Start loading a document.
    pub fn session(&self) -> LoadSession<'_> {
        LoadSession {
            context: self,
            paginated: HashMap::new(),
        }
    }

    /// Load a document whose root element is a pane.
    pub fn load_pane(&self, source: &str) -> Result<SharedPane> {
        let _span = PerfSpan::new(span_names::LOAD);
        let document = parse_document(source)?;
        self.session().load_pane(document.root())
    }

    /// Load a `<chestgui>` document.
    pub fn load_chest_gui(&self, source: &str) -> Result<ChestGui> {
        let _span = PerfSpan::new(span_names::LOAD);
        let document = parse_document(source)?;
        self.session().load_chest_gui(document.root())
    }
}

impl Default for LoadContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut actions: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        actions.sort_unstable();
        let mut hooks: Vec<&str> = self.populate_hooks.keys().map(String::as_str).collect();
        hooks.sort_unstable();

        f.debug_struct("LoadContext")
            .field("actions", &actions)
            .field("populate_hooks", &hooks)
            .field("panes", &self.panes)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(LoadContext: Send, Sync);

// ============================================================================
// LoadSession
// ============================================================================

/// State of one document being loaded.
///
/// Paginated panes carrying an `id` are remembered for the rest of the
/// document so that paging buttons declared after them can refer to them.
pub struct LoadSession<'a> {
    context: &'a LoadContext,
    paginated: HashMap<String, Arc<RwLock<PaginatedPane>>>,
}

impl<'a> LoadSession<'a> {
    pub fn context(&self) -> &'a LoadContext {
        self.context
    }

    /// Load the pane declared by `element`.
    pub fn load_pane(&mut self, element: &XmlElement) -> Result<SharedPane> {
        let context = self.context;
        let loader = context.panes.get(element.name()).ok_or_else(|| {
            Error::load(format!(
                "Pane '{}' is not registered or does not exist",
                element.name()
            ))
        })?;

        let pane = loader(self, element)?;
        tracing::debug!(target: targets::XML, pane = element.name(), "loaded pane");
        Ok(pane)
    }

    /// Load every child of `element` as a pane.
    pub fn load_child_panes(&mut self, element: &XmlElement) -> Result<Vec<SharedPane>> {
        element
            .child_elements()
            .map(|child| self.load_pane(child))
            .collect()
    }

    /// Remember a paginated pane under `id`.
    pub fn register_paginated(&mut self, id: impl Into<String>, pane: Arc<RwLock<PaginatedPane>>) {
        self.paginated.insert(id.into(), pane);
    }

    /// The paginated pane declared earlier with `id`.
    pub fn paginated(&self, id: &str) -> Result<Arc<RwLock<PaginatedPane>>> {
        self.paginated.get(id).cloned().ok_or_else(|| {
            Error::reflection(format!("no paginated pane with id '{id}' was declared"))
        })
    }

    /// Apply the attributes every pane understands.
    ///
    /// Returns whether a population hook ran; the caller must then skip the
    /// element's children.
    pub fn apply_common(&self, pane: &mut dyn Pane, element: &XmlElement) -> Result<bool> {
        if let Some(slot) = slot_of(element)? {
            pane.set_slot(slot);
        }
        if let Some(priority) = element.attribute("priority") {
            pane.set_priority(priority.parse::<Priority>()?);
        }
        if let Some(visible) = element.bool_attribute("visible")? {
            pane.set_visible(visible);
        }
        if let Some(name) = element.attribute("onClick") {
            pane.set_on_click(Some(self.context.action(name)?));
        }

        match element.attribute("populate") {
            Some(name) => {
                let hook = self.context.populate_hook(name)?;
                hook(pane).map_err(Error::into_load)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Load an `<item>` element.
    pub fn load_item(&self, element: &XmlElement) -> Result<GuiItem> {
        let material = element.required_attribute("id")?.trim();
        if material.is_empty() {
            return Err(Error::load("Can't find material for ''"));
        }

        let mut stack = ItemStack::new(material);
        if let Some(amount) = element.parse_attribute::<u32>("amount")? {
            stack.set_amount(amount);
        }

        let mut properties = Vec::new();
        for child in element.child_elements() {
            match child.name() {
                "displayname" => {
                    stack.meta_mut().display_name = Some(child.text().to_string());
                }
                "lore" => {
                    for line in child.child_elements() {
                        expect_tag(line, "line", "lore")?;
                        stack.meta_mut().lore.push(line.text().to_string());
                    }
                }
                "enchantments" => {
                    for enchantment in child.child_elements() {
                        expect_tag(enchantment, "enchantment", "enchantments")?;
                        let id = enchantment.required_attribute("id")?.to_ascii_lowercase();
                        let level = enchantment.parse_required::<u32>("level")?;
                        stack.meta_mut().enchantments.insert(id, level);
                    }
                }
                "modeldata" => {
                    let data = child.text().trim().parse::<i32>().map_err(|_| {
                        Error::load(format!("Invalid model data '{}'", child.text()))
                    })?;
                    stack.meta_mut().custom_model_data = Some(data);
                }
                "skull" => {
                    let owner = child.attribute("owner").or_else(|| child.attribute("id"));
                    if let Some(owner) = owner {
                        stack.meta_mut().skull_owner = Some(owner.to_string());
                    }
                }
                "properties" => {
                    for property in child.child_elements() {
                        expect_tag(property, "property", "properties")?;
                        let kind = property.attribute("type").unwrap_or("string");
                        properties.push(self.context.parse_property(kind, property.text())?);
                    }
                }
                other => {
                    return Err(Error::load(format!("Unknown tag {other} in item")));
                }
            }
        }

        let mut item = GuiItem::new(stack);
        item.set_properties(properties);
        if let Some(name) = element.attribute("onClick") {
            item.set_action(Some(self.context.action(name)?));
        }
        Ok(item)
    }

    /// Load a `<chestgui>` element.
    ///
    /// Panes are either direct children or children of a `<component>`
    /// element.
    pub fn load_chest_gui(&mut self, element: &XmlElement) -> Result<ChestGui> {
        if element.name() != "chestgui" {
            return Err(Error::load(format!(
                "Expected a chestgui element, found <{}>",
                element.name()
            )));
        }

        let title = element.required_attribute("title")?;
        let rows = element.parse_required::<i32>("rows")?;
        let mut gui = ChestGui::new(rows, title).map_err(Error::into_load)?;

        if let Some(name) = element.attribute("onTopClick") {
            gui.set_on_top_click(Some(self.context.action(name)?));
        }
        if let Some(name) = element.attribute("onBottomClick") {
            gui.set_on_bottom_click(Some(self.context.action(name)?));
        }
        if let Some(name) = element.attribute("onGlobalClick") {
            gui.set_on_global_click(Some(self.context.action(name)?));
        }
        if let Some(name) = element.attribute("onOutsideClick") {
            gui.set_on_outside_click(Some(self.context.action(name)?));
        }
        if let Some(name) = element.attribute("onClose") {
            gui.set_on_close(Some(self.context.close_action(name)?));
        }

        for child in element.child_elements() {
            if child.name().eq_ignore_ascii_case("component") {
                for pane in self.load_child_panes(child)? {
                    gui.add_pane(pane);
                }
            } else {
                let pane = self.load_pane(child)?;
                gui.add_pane(pane);
            }
        }

        tracing::debug!(
            target: targets::XML,
            title = gui.title(),
            rows = gui.rows(),
            panes = gui.panes().len(),
            "loaded chest gui"
        );
        Ok(gui)
    }
}

impl fmt::Debug for LoadSession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.paginated.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("LoadSession")
            .field("paginated", &ids)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Attribute helpers
// ============================================================================

/// Read a slot from `x`/`y` or `index`.
///
/// An element with none of them has no slot; mixing both forms is an error.
fn slot_of(element: &XmlElement) -> Result<Option<Slot>> {
    let x = element.parse_attribute::<i32>("x")?;
    let y = element.parse_attribute::<i32>("y")?;
    let index = element.parse_attribute::<i32>("index")?;

    match (x, y, index) {
        (Some(x), Some(y), None) => Ok(Some(Slot::xy(x, y))),
        (None, None, Some(index)) => Ok(Some(Slot::indexed(index))),
        (None, None, None) => Ok(None),
        _ => Err(Error::load(format!(
            "<{}> has an invalid combination of x, y and index attributes",
            element.name()
        ))),
    }
}

fn dimensions(element: &XmlElement) -> Result<(i32, i32)> {
    Ok((
        element.parse_required("length")?,
        element.parse_required("height")?,
    ))
}

fn orientation_of(element: &XmlElement) -> Result<Option<Orientation>> {
    element
        .attribute("orientation")
        .map(str::parse::<Orientation>)
        .transpose()
}

fn rotation_of(element: &XmlElement) -> Result<Option<i32>> {
    element.parse_attribute("rotation")
}

/// Both flip attributes, each `None` when absent.
fn flips_of(element: &XmlElement) -> Result<(Option<bool>, Option<bool>)> {
    Ok((
        element.bool_attribute("flipHorizontally")?,
        element.bool_attribute("flipVertically")?,
    ))
}

fn expect_tag(element: &XmlElement, expected: &str, parent: &str) -> Result<()> {
    if element.name() == expected {
        Ok(())
    } else {
        Err(Error::load(format!(
            "Unknown tag {} in {}",
            element.name(),
            parent
        )))
    }
}

/// Rows of a `<mask>` or `<pattern>` element.
fn rows_of(element: &XmlElement) -> Result<Vec<&str>> {
    element
        .child_elements()
        .map(|row| {
            expect_tag(row, "row", element.name())?;
            Ok(row.text())
        })
        .collect()
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(character), None) => Some(character),
        _ => None,
    }
}

fn parse_number<T: std::str::FromStr>(text: &str, kind: &str) -> Result<T> {
    text.trim().parse().map_err(|_| invalid_property(kind, text))
}

fn invalid_property(kind: &str, text: &str) -> Error {
    Error::load(format!("'{text}' is not a valid {kind} property"))
}

// ============================================================================
// Built-in loaders
// ============================================================================

fn load_outline_pane(session: &mut LoadSession<'_>, element: &XmlElement) -> Result<SharedPane> {
    let (length, height) = dimensions(element)?;
    let mut pane = OutlinePane::new(length, height).map_err(Error::into_load)?;

    if let Some(gap) = element.parse_attribute::<usize>("gap")? {
        pane.set_gap(gap);
    }
    if let Some(repeat) = element.bool_attribute("repeat")? {
        pane.set_repeat(repeat);
    }
    if let Some(alignment) = element.attribute("alignment") {
        pane.set_alignment(alignment.parse::<Alignment>()?);
    }
    if let Some(orientation) = orientation_of(element)? {
        pane.set_orientation(orientation);
    }
    let (horizontal, vertical) = flips_of(element)?;
    if let Some(flip) = horizontal {
        pane.flip_horizontally(flip);
    }
    if let Some(flip) = vertical {
        pane.flip_vertically(flip);
    }
    if let Some(degrees) = rotation_of(element)? {
        pane.set_rotation(degrees).map_err(Error::into_load)?;
    }

    if !session.apply_common(&mut pane, element)? {
        for child in element.child_elements() {
            match child.name() {
                "empty" => pane.add_item(GuiItem::new(ItemStack::air())),
                "mask" => {
                    let mask = Mask::new(rows_of(child)?)?;
                    pane.apply_mask(mask).map_err(Error::into_load)?;
                }
                _ => pane.add_item(session.load_item(child)?),
            }
        }
    }

    Ok(share(pane))
}

fn load_static_pane(session: &mut LoadSession<'_>, element: &XmlElement) -> Result<SharedPane> {
    let (length, height) = dimensions(element)?;
    let mut pane = StaticPane::new(length, height).map_err(Error::into_load)?;

    let (horizontal, vertical) = flips_of(element)?;
    if let Some(flip) = horizontal {
        pane.flip_horizontally(flip);
    }
    if let Some(flip) = vertical {
        pane.flip_vertically(flip);
    }
    if let Some(degrees) = rotation_of(element)? {
        pane.set_rotation(degrees).map_err(Error::into_load)?;
    }

    if !session.apply_common(&mut pane, element)? {
        for child in element.child_elements() {
            let item = session.load_item(child)?;
            let slot = slot_of(child)?.unwrap_or_default();
            pane.add_item(item, slot);
        }
    }

    Ok(share(pane))
}

fn load_pattern_pane(session: &mut LoadSession<'_>, element: &XmlElement) -> Result<SharedPane> {
    let mut pattern = None;
    let mut bindings = Vec::new();

    for child in element.child_elements() {
        match child.name() {
            "pattern" => pattern = Some(Pattern::new(rows_of(child)?)?),
            "binding" => {
                let character = child
                    .attribute("char")
                    .ok_or_else(|| Error::load("Missing char attribute on binding"))?;
                let character = single_char(character)
                    .ok_or_else(|| Error::load("Char attribute doesn't have one character"))?;

                if child.child_element_count() != 1 {
                    return Err(Error::load("Binding must contain exactly one item"));
                }
                for item in child.child_elements() {
                    bindings.push((character, session.load_item(item)?));
                }
            }
            other => {
                return Err(Error::load(format!("Unknown tag {other} in pattern pane")));
            }
        }
    }

    let pattern = pattern.ok_or_else(|| Error::load("Pattern pane doesn't have a pattern"))?;
    let (length, height) = dimensions(element)?;
    let mut pane = PatternPane::new(length, height, pattern).map_err(Error::into_load)?;

    let (horizontal, vertical) = flips_of(element)?;
    if let Some(flip) = horizontal {
        pane.flip_horizontally(flip);
    }
    if let Some(flip) = vertical {
        pane.flip_vertically(flip);
    }
    if let Some(degrees) = rotation_of(element)? {
        pane.set_rotation(degrees).map_err(Error::into_load)?;
    }

    if !session.apply_common(&mut pane, element)? {
        for (character, item) in bindings {
            pane.bind_item(character, item);
        }
    }

    Ok(share(pane))
}

fn load_paginated_pane(
    session: &mut LoadSession<'_>,
    element: &XmlElement,
) -> Result<SharedPane> {
    let (length, height) = dimensions(element)?;
    let mut pane = PaginatedPane::new(length, height).map_err(Error::into_load)?;

    if !session.apply_common(&mut pane, element)? {
        for (page, child) in element.child_elements().enumerate() {
            if child.name() != "page" {
                return Err(Error::load("Panes have to be inside page tag"));
            }
            for inner in child.child_elements() {
                let inner = session.load_pane(inner)?;
                pane.add_pane(page as i32, inner);
            }
        }
    }

    let pane = Arc::new(RwLock::new(pane));
    if let Some(id) = element.attribute("id") {
        session.register_paginated(id, Arc::clone(&pane));
    }
    Ok(pane)
}

fn load_masonry_pane(session: &mut LoadSession<'_>, element: &XmlElement) -> Result<SharedPane> {
    let (length, height) = dimensions(element)?;
    let mut pane = MasonryPane::new(length, height).map_err(Error::into_load)?;

    if let Some(orientation) = orientation_of(element)? {
        pane.set_orientation(orientation);
    }

    if !session.apply_common(&mut pane, element)? {
        for child in session.load_child_panes(element)? {
            pane.add_pane(child);
        }
    }

    Ok(share(pane))
}

fn load_percentage_bar(
    session: &mut LoadSession<'_>,
    element: &XmlElement,
) -> Result<SharedPane> {
    let (length, height) = dimensions(element)?;
    let mut bar = PercentageBar::new(length, height).map_err(Error::into_load)?;

    if let Some(orientation) = orientation_of(element)? {
        bar.set_orientation(orientation);
    }
    let (horizontal, vertical) = flips_of(element)?;
    if let Some(flip) = horizontal {
        bar.flip_horizontally(flip);
    }
    if let Some(flip) = vertical {
        bar.flip_vertically(flip);
    }

    if !session.apply_common(&mut bar, element)? {
        if let Some(percentage) = element.parse_attribute::<f32>("percentage")? {
            bar.set_percentage(percentage).map_err(Error::into_load)?;
        }
    }

    Ok(share(bar))
}

fn load_slider(session: &mut LoadSession<'_>, element: &XmlElement) -> Result<SharedPane> {
    let (length, height) = dimensions(element)?;
    let mut slider = Slider::new(length, height).map_err(Error::into_load)?;

    if let Some(orientation) = orientation_of(element)? {
        slider.set_orientation(orientation);
    }
    let (horizontal, vertical) = flips_of(element)?;
    if let Some(flip) = horizontal {
        slider.flip_horizontally(flip);
    }
    if let Some(flip) = vertical {
        slider.flip_vertically(flip);
    }

    if !session.apply_common(&mut slider, element)? {
        if let Some(value) = element.parse_attribute::<f32>("value")? {
            slider.set_value(value).map_err(Error::into_load)?;
        }
    }

    Ok(share(slider))
}

fn load_toggle_button(
    session: &mut LoadSession<'_>,
    element: &XmlElement,
) -> Result<SharedPane> {
    let (length, height) = dimensions(element)?;
    let enabled = element.bool_attribute("enabled")?.unwrap_or(false);
    let mut button = ToggleButton::new(length, height)
        .map_err(Error::into_load)?
        .with_enabled(enabled);

    session.apply_common(&mut button, element)?;
    Ok(share(button))
}

fn load_cycle_button(session: &mut LoadSession<'_>, element: &XmlElement) -> Result<SharedPane> {
    let (length, height) = dimensions(element)?;
    let mut button = CycleButton::new(length, height).map_err(Error::into_load)?;

    if !session.apply_common(&mut button, element)? {
        for child in session.load_child_panes(element)? {
            button.add_pane(child);
        }
    }

    Ok(share(button))
}

fn load_paging_buttons(
    session: &mut LoadSession<'_>,
    element: &XmlElement,
) -> Result<SharedPane> {
    let length = element.parse_required::<i32>("length")?;
    let id = element
        .attribute("pages")
        .ok_or_else(|| Error::load("Paging buttons does not have pages attribute"))?;
    let pages = session.paginated(id)?;

    let mut buttons = PagingButtons::new(length, pages).map_err(Error::into_load)?;
    session.apply_common(&mut buttons, element)?;
    Ok(share(buttons))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::action;

    fn outline(pane: &SharedPane) -> OutlinePane {
        pane.read()
            .as_any()
            .downcast_ref::<OutlinePane>()
            .unwrap()
            .duplicate()
    }

    #[test]
    fn test_builtin_names() {
        let registry = PaneRegistry::new();
        assert_eq!(
            registry.names(),
            vec![
                "cyclebutton",
                "masonrypane",
                "outlinepane",
                "paginatedpane",
                "pagingbuttons",
                "patternpane",
                "percentagebar",
                "slider",
                "staticpane",
                "togglebutton",
            ]
        );
    }

    #[test]
    fn test_duplicate_registrations_fail() {
        let mut context = LoadContext::new();
        assert!(
            context
                .register_pane("outlinepane", load_outline_pane)
                .unwrap_err()
                .is_precondition()
        );
        assert!(
            context
                .register_property("integer", |text| Ok(PropertyValue::String(text.into())))
                .unwrap_err()
                .is_precondition()
        );
        assert!(
            context
                .register_property("uuid", |text| Ok(PropertyValue::String(text.into())))
                .is_ok()
        );
    }

    #[test]
    fn test_outline_attributes() {
        let context = LoadContext::new();
        let pane = context
            .load_pane(
                r#"<outlinepane x="1" y="2" length="3" height="3" gap="1" repeat="true"
                        alignment="center" orientation="vertical" rotation="90"
                        flipHorizontally="true" priority="high" visible="false">
                    <item id="stone"/>
                    <empty/>
                </outlinepane>"#,
            )
            .unwrap();

        let pane = outline(&pane);
        assert_eq!(pane.slot(), Slot::xy(1, 2));
        assert_eq!(pane.gap(), 1);
        assert!(pane.does_repeat());
        assert_eq!(pane.alignment(), Alignment::Center);
        assert_eq!(pane.orientation(), Orientation::Vertical);
        assert_eq!(pane.rotation().degrees(), 90);
        assert!(pane.flip().horizontal);
        assert_eq!(pane.priority(), Priority::High);
        assert!(!pane.is_visible());
        assert_eq!(pane.item_list().len(), 2);
        assert!(pane.item_list()[1].stack().is_air());
    }

    #[test]
    fn test_outline_mask() {
        let context = LoadContext::new();
        let pane = context
            .load_pane(
                r#"<outlinepane length="3" height="1">
                    <mask><row>101</row></mask>
                </outlinepane>"#,
            )
            .unwrap();
        assert_eq!(outline(&pane).mask().enabled_count(), 2);
    }

    #[test]
    fn test_item_children() {
        let context = LoadContext::new();
        let session = context.session();
        let doc = parse_document(
            r#"<item id="PLAYER_HEAD" amount="3">
                <displayname>Head</displayname>
                <lore><line>first</line><line>second</line></lore>
                <enchantments><enchantment id="MENDING" level="1"/></enchantments>
                <modeldata>7</modeldata>
                <skull owner="Notch"/>
                <properties>
                    <property type="integer">5</property>
                    <property>text</property>
                </properties>
            </item>"#,
        )
        .unwrap();

        let item = session.load_item(doc.root()).unwrap();
        let stack = item.stack();
        assert_eq!(stack.material(), "player_head");
        assert_eq!(stack.amount(), 3);
        assert_eq!(stack.meta().display_name.as_deref(), Some("Head"));
        assert_eq!(stack.meta().lore, vec!["first", "second"]);
        assert_eq!(stack.meta().enchantments.get("mending"), Some(&1));
        assert_eq!(stack.meta().custom_model_data, Some(7));
        assert_eq!(stack.meta().skull_owner.as_deref(), Some("Notch"));
        assert_eq!(
            item.properties(),
            &[
                PropertyValue::Integer(5),
                PropertyValue::String("text".into())
            ]
        );
    }

    #[test]
    fn test_unresolved_action_is_reflection_error() {
        let context = LoadContext::new();
        let error = context
            .load_pane(r#"<outlinepane length="1" height="1"><item id="a" onClick="nope"/></outlinepane>"#)
            .unwrap_err();
        assert!(error.is_reflection());
    }

    #[test]
    fn test_missing_attributes_are_load_errors() {
        let context = LoadContext::new();
        assert!(context.load_pane(r#"<outlinepane length="1"/>"#).unwrap_err().is_load());
        assert!(context.load_pane(r#"<outlinepane length="x" height="1"/>"#).unwrap_err().is_load());
        assert!(context.load_pane(r#"<unknownpane/>"#).unwrap_err().is_load());
        assert!(
            context
                .load_pane(r#"<outlinepane length="1" height="1" x="1" index="2"/>"#)
                .unwrap_err()
                .is_load()
        );
        assert!(
            context
                .load_pane(r#"<percentagebar length="2" height="1" percentage="2"/>"#)
                .unwrap_err()
                .is_load()
        );
    }

    #[test]
    fn test_populate_skips_children() {
        let mut context = LoadContext::new();
        context.register_populate("fill", |pane: &mut dyn Pane| {
            let outline = pane
                .as_any_mut()
                .downcast_mut::<OutlinePane>()
                .ok_or_else(|| Error::load("not an outline pane"))?;
            outline.add_item(GuiItem::new(ItemStack::new("diamond")));
            Ok(())
        });

        let pane = context
            .load_pane(
                r#"<outlinepane length="2" height="1" populate="fill">
                    <item id="stone"/>
                </outlinepane>"#,
            )
            .unwrap();

        let pane = outline(&pane);
        assert_eq!(pane.item_list().len(), 1);
        assert_eq!(pane.item_list()[0].stack().material(), "diamond");
    }

    #[test]
    fn test_pane_on_click() {
        let mut context = LoadContext::new();
        context.register_action("noop", action(|_| Ok(())));

        let pane = context
            .load_pane(r#"<staticpane length="1" height="1" onClick="noop"/>"#)
            .unwrap();
        assert!(pane.read().pane_base().has_on_click());
    }

    #[test]
    fn test_paging_buttons_reference() {
        let context = LoadContext::new();
        let pane = context
            .load_pane(
                r#"<masonrypane length="9" height="2">
                    <paginatedpane id="shop" length="9" height="1">
                        <page><outlinepane length="9" height="1"><item id="a"/></outlinepane></page>
                        <page><outlinepane length="9" height="1"><item id="b"/></outlinepane></page>
                    </paginatedpane>
                    <pagingbuttons x="0" y="1" length="9" pages="shop"/>
                </masonrypane>"#,
            )
            .unwrap();

        let pane = pane.read();
        let masonry = pane.as_any().downcast_ref::<MasonryPane>().unwrap();
        let children = masonry.children();
        let buttons = children[1].read();
        let buttons = buttons.as_any().downcast_ref::<PagingButtons>().unwrap();
        assert_eq!(buttons.pages().read().page_count(), 2);

        let error = context
            .load_pane(r#"<pagingbuttons length="9" pages="missing"/>"#)
            .unwrap_err();
        assert!(error.is_reflection());
    }
}
