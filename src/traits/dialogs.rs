//! Modal dialogs opened by the action panel buttons.
//!
//! Both dialogs run to completion before returning, the way a modal dialog
//! does on the UI thread.

use std::io::Cursor;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat};

/// An avatar picked or cropped by the user.
#[derive(Debug, Clone)]
pub struct AvatarImage(DynamicImage);

impl AvatarImage {
    pub fn new(image: DynamicImage) -> Self {
        Self(image)
    }

    /// An image with no pixels, returned when the user cancels the picker.
    pub fn empty() -> Self {
        Self(DynamicImage::new_rgba8(0, 0))
    }

    pub fn is_empty(&self) -> bool {
        self.0.width() == 0 || self.0.height() == 0
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.0.width(), self.0.height())
    }

    /// Encode as PNG for upload. Empty images encode to an empty buffer.
    pub fn to_png_bytes(&self) -> Result<Bytes, image::ImageError> {
        if self.is_empty() {
            return Ok(Bytes::new());
        }
        let mut buf = Vec::new();
        self.0.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(Bytes::from(buf))
    }
}

impl From<DynamicImage> for AvatarImage {
    fn from(image: DynamicImage) -> Self {
        Self::new(image)
    }
}

/// Avatar selection and crop flow.
pub trait AvatarEditor {
    /// Let the user pick an image file for the contact's avatar.
    fn select_file(&mut self, contact: &str);

    /// The cropped result of the last selection; empty if cancelled.
    fn cropped_image(&self) -> AvatarImage;
}

/// Editable group attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFields {
    pub name: String,
    pub description: String,
    pub rules: String,
}

/// What the group editor produced when the user confirmed it.
#[derive(Debug, Clone)]
pub struct GroupEditOutcome {
    pub fields: GroupFields,
    /// A new avatar chosen inside the editor, if any
    pub avatar: Option<AvatarImage>,
}

impl GroupEditOutcome {
    pub fn new(fields: GroupFields) -> Self {
        Self {
            fields,
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: AvatarImage) -> Self {
        self.avatar = Some(avatar);
        self
    }
}

/// Group settings dialog.
pub trait GroupEditor {
    /// Show the dialog pre-filled with `current`. `None` means cancelled.
    fn edit(&mut self, contact: &str, current: GroupFields) -> Option<GroupEditOutcome>;
}
