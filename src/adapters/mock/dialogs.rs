//! Dialogs that return canned results.

use std::sync::{Arc, Mutex};

use crate::traits::{AvatarEditor, AvatarImage, GroupEditOutcome, GroupEditor, GroupFields};

/// Avatar picker that "selects" a preset image.
#[derive(Debug, Clone)]
pub struct ScriptedAvatarEditor {
    image: AvatarImage,
    selected_for: Arc<Mutex<Vec<String>>>,
}

impl ScriptedAvatarEditor {
    /// An editor where the user picks `image`.
    pub fn returning(image: AvatarImage) -> Self {
        Self {
            image,
            selected_for: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// An editor where the user cancels.
    pub fn cancelled() -> Self {
        Self::returning(AvatarImage::empty())
    }

    /// Contacts `select_file` was called for, in order.
    pub fn selected_for(&self) -> Vec<String> {
        self.selected_for.lock().unwrap().clone()
    }
}

impl AvatarEditor for ScriptedAvatarEditor {
    fn select_file(&mut self, contact: &str) {
        self.selected_for.lock().unwrap().push(contact.to_string());
    }

    fn cropped_image(&self) -> AvatarImage {
        self.image.clone()
    }
}

type EditFn = Box<dyn FnMut(&str, GroupFields) -> Option<GroupEditOutcome> + Send>;

/// Group editor driven by a closure.
///
/// The closure sees what the dialog was pre-filled with and decides what the
/// user "typed". Side effects on shared fakes (say, a directory) can be made
/// inside it to model a backend that updates while the dialog is open.
pub struct ScriptedGroupEditor {
    script: EditFn,
    calls: Arc<Mutex<Vec<(String, GroupFields)>>>,
}

impl ScriptedGroupEditor {
    pub fn new(
        script: impl FnMut(&str, GroupFields) -> Option<GroupEditOutcome> + Send + 'static,
    ) -> Self {
        Self {
            script: Box::new(script),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The user confirms with `fields`.
    pub fn confirming(fields: GroupFields) -> Self {
        Self::new(move |_, _| Some(GroupEditOutcome::new(fields.clone())))
    }

    /// The user confirms after editing only the description.
    pub fn setting_description(description: &str) -> Self {
        let description = description.to_string();
        Self::new(move |_, mut current| {
            current.description = description.clone();
            Some(GroupEditOutcome::new(current))
        })
    }

    /// The user dismisses the dialog.
    pub fn cancelling() -> Self {
        Self::new(|_, _| None)
    }

    /// Every `(contact, pre-filled fields)` pair the dialog was opened with.
    pub fn calls(&self) -> Vec<(String, GroupFields)> {
        self.calls.lock().unwrap().clone()
    }

    /// A handle on the call log that outlives a move into an item.
    pub fn call_log(&self) -> Arc<Mutex<Vec<(String, GroupFields)>>> {
        Arc::clone(&self.calls)
    }
}

impl std::fmt::Debug for ScriptedGroupEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedGroupEditor")
            .field("calls", &self.calls)
            .finish_non_exhaustive()
    }
}

impl GroupEditor for ScriptedGroupEditor {
    fn edit(&mut self, contact: &str, current: GroupFields) -> Option<GroupEditOutcome> {
        self.calls
            .lock()
            .unwrap()
            .push((contact.to_string(), current.clone()));
        (self.script)(contact, current)
    }
}
