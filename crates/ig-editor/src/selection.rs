//! Text objects on the canvas and the current selection.
//!
//! `TextLayer` owns every object's `TextStyles`. Toolbar controls only
//! ever see a copy (`active_styles`) and hand back patches through
//! `commit`, which merges them into each selected object.

use ig_core::{ObjectId, TextStylePatch, TextStyles};
use serde::{Deserialize, Serialize};

/// A text box placed on the infographic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextObject {
    pub id: ObjectId,
    pub content: String,
    #[serde(default)]
    pub styles: TextStyles,
}

impl TextObject {
    pub fn new(id: ObjectId, content: &str) -> Self {
        Self {
            id,
            content: content.to_string(),
            styles: TextStyles::default(),
        }
    }

    pub fn with_styles(mut self, styles: TextStyles) -> Self {
        self.styles = styles;
        self
    }
}

/// Before/after styles of one object touched by a commit.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleChange {
    pub id: ObjectId,
    pub before: TextStyles,
    pub after: TextStyles,
}

#[derive(Debug, Clone, Default)]
pub struct TextLayer {
    objects: Vec<TextObject>,
    selected: Vec<ObjectId>,
}

impl TextLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, replacing any existing one with the same id.
    pub fn insert(&mut self, object: TextObject) {
        match self.objects.iter_mut().find(|o| o.id == object.id) {
            Some(existing) => *existing = object,
            None => self.objects.push(object),
        }
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<TextObject> {
        let pos = self.objects.iter().position(|o| o.id == id)?;
        self.selected.retain(|s| *s != id);
        Some(self.objects.remove(pos))
    }

    pub fn get(&self, id: ObjectId) -> Option<&TextObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn objects(&self) -> &[TextObject] {
        &self.objects
    }

    pub fn selected(&self) -> &[ObjectId] {
        &self.selected
    }

    /// Replace the selection. Unknown ids are dropped.
    pub fn select(&mut self, ids: &[ObjectId]) {
        let mut selected = Vec::with_capacity(ids.len());
        for id in ids {
            if self.get(*id).is_some() && !selected.contains(id) {
                selected.push(*id);
            }
        }
        self.selected = selected;
    }

    /// Shift+click: add or remove one object.
    pub fn toggle_selected(&mut self, id: ObjectId) {
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
        } else if self.get(id).is_some() {
            self.selected.push(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Styles shown in the toolbar: the first selected object's.
    pub fn active_styles(&self) -> Option<TextStyles> {
        let id = self.selected.first()?;
        self.get(*id).map(|o| o.styles.clone())
    }

    /// Merge `patch` into every selected object. Returns the objects whose
    /// styles actually changed.
    pub fn commit(&mut self, patch: &TextStylePatch) -> Vec<StyleChange> {
        if patch.is_empty() {
            return Vec::new();
        }
        let mut changes = Vec::new();
        for object in &mut self.objects {
            if !self.selected.contains(&object.id) {
                continue;
            }
            let after = object.styles.merged(patch);
            if after == object.styles {
                continue;
            }
            let before = std::mem::replace(&mut object.styles, after.clone());
            changes.push(StyleChange {
                id: object.id,
                before,
                after,
            });
        }
        log::debug!(
            "commit {:?} -> {} object(s) changed",
            patch.fields(),
            changes.len()
        );
        changes
    }

    /// Overwrite one object's styles (undo/redo). Returns `false` if the
    /// object no longer exists.
    pub fn restore(&mut self, id: ObjectId, styles: &TextStyles) -> bool {
        match self.objects.iter_mut().find(|o| o.id == id) {
            Some(object) => {
                object.styles = styles.clone();
                true
            }
            None => false,
        }
    }
}
