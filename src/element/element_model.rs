use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Coarse tag category assigned by the (external) DOM instrumentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    Link,
    Button,
    Input,
    Form,
    Media,
    Container,
    Text,
    #[default]
    Other,
}

/// One observed element, as produced by the external instrumentation layer.
///
/// Immutable once produced. The core never inspects anything beyond these
/// fields; raw DOM nodes stay on the instrumentation side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementDescriptor {
    pub tag: TagCategory,
    pub role: Option<String>,

    // Interactive capability flags
    pub clickable: bool,
    pub focusable: bool,
    pub editable: bool,
    pub draggable: bool,

    // Content flags
    pub has_text: bool,
    pub has_image: bool,
    pub is_form_field: bool,
    pub is_link: bool,

    // State flags
    pub visible: bool,
    pub enabled: bool,
    pub selected: bool,
    pub checked: bool,
    pub expanded: bool,

    /// Recognized functional data-markers and their raw values
    pub data_markers: BTreeMap<String, String>,

    // Accessibility flags
    pub has_label: bool,
    pub has_description: bool,
    pub aria_hidden: bool,
}

impl ElementDescriptor {
    /// Whether the element offers any interactive capability.
    pub fn is_interactive(&self) -> bool {
        self.clickable || self.focusable || self.editable || self.draggable
    }

    /// Whether the element counts as a navigation link.
    pub fn is_navigation_link(&self) -> bool {
        self.is_link || self.tag == TagCategory::Link
    }
}
