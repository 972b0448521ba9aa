//! Page markup a dropdown binds to.
//!
//! A page is described as a tree of [`Node`]s. A dropdown container must hold
//! a trigger, a panel, an options list and a display element; a search input
//! and a hidden form field are optional. The hidden field is looked up in the
//! nearest form group first and then among the container's siblings.

use serde::{Deserialize, Serialize};

use crate::error::{ConstructionError, DropdownPart};

/// What a markup node is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Role {
    Page,
    Form,
    /// Label + control + hidden field wrapper.
    FormGroup,
    /// Modal dialog layer; dropdowns inside use window-fixed placement.
    ModalOverlay,
    Container,
    Trigger,
    Display,
    Panel,
    SearchInput,
    OptionsList,
    HiddenField { name: String },
    Label { text: String },
    Button { text: String },
}

/// A node of the page markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(flatten)]
    pub role: Role,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            children: Vec::new(),
        }
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Standard dropdown container markup with every part present.
    pub fn dropdown(id: &str, searchable: bool) -> Self {
        let panel = Node::new(format!("{id}-panel"), Role::Panel);
        let panel = if searchable {
            panel.child(Node::new(format!("{id}-search"), Role::SearchInput))
        } else {
            panel
        };
        Node::new(id, Role::Container)
            .child(
                Node::new(format!("{id}-trigger"), Role::Trigger)
                    .child(Node::new(format!("{id}-display"), Role::Display)),
            )
            .child(panel.child(Node::new(format!("{id}-options"), Role::OptionsList)))
    }

    /// A form group wrapping a dropdown and its hidden field.
    pub fn select_group(id: &str, label: &str, field: &str, searchable: bool) -> Self {
        Node::new(format!("{id}-group"), Role::FormGroup)
            .child(Node::new(
                format!("{id}-label"),
                Role::Label {
                    text: label.to_string(),
                },
            ))
            .child(Node::dropdown(id, searchable))
            .child(Node::new(
                format!("{id}-value"),
                Role::HiddenField {
                    name: field.to_string(),
                },
            ))
    }

    /// Depth-first search for a node by id.
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// First descendant (excluding self) matching `pred`.
    pub fn find_descendant(&self, pred: &dyn Fn(&Role) -> bool) -> Option<&Node> {
        self.children.iter().find_map(|child| {
            if pred(&child.role) {
                Some(child)
            } else {
                child.find_descendant(pred)
            }
        })
    }

    /// Chain of nodes from the root down to `id`, inclusive.
    pub fn path_to(&self, id: &str) -> Option<Vec<&Node>> {
        if self.id == id {
            return Some(vec![self]);
        }
        self.children.iter().find_map(|child| {
            child.path_to(id).map(|mut path| {
                path.insert(0, self);
                path
            })
        })
    }
}

/// The parts of the page a dropdown was bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub container: String,
    pub trigger: String,
    pub panel: String,
    pub options_list: String,
    pub display: String,
    pub search_input: Option<String>,
    /// Name of the hidden form field, when one was found.
    pub hidden_field: Option<String>,
    pub in_overlay: bool,
}

impl Binding {
    /// Resolves a container's parts within `page`.
    pub fn resolve(page: &Node, container_id: &str) -> Result<Self, ConstructionError> {
        let path = page
            .path_to(container_id)
            .ok_or_else(|| ConstructionError::ContainerNotFound(container_id.to_string()))?;
        let (container, ancestors) = match path.split_last() {
            Some((container, ancestors)) => (*container, ancestors),
            None => return Err(ConstructionError::ContainerNotFound(container_id.to_string())),
        };

        let required = |part: DropdownPart, pred: &dyn Fn(&Role) -> bool| {
            container
                .find_descendant(pred)
                .map(|node| node.id.clone())
                .ok_or(ConstructionError::MissingPart {
                    container: container_id.to_string(),
                    part,
                })
        };

        let trigger = required(DropdownPart::Trigger, &|r| *r == Role::Trigger)?;
        let panel = required(DropdownPart::Panel, &|r| *r == Role::Panel)?;
        let options_list = required(DropdownPart::OptionsList, &|r| *r == Role::OptionsList)?;
        let display = required(DropdownPart::Display, &|r| *r == Role::Display)?;
        let search_input = container
            .find_descendant(&|r| *r == Role::SearchInput)
            .map(|node| node.id.clone());

        let in_overlay = ancestors
            .iter()
            .any(|node| node.role == Role::ModalOverlay);

        Ok(Self {
            container: container_id.to_string(),
            trigger,
            panel,
            options_list,
            display,
            search_input,
            hidden_field: hidden_field_for(container, ancestors),
            in_overlay,
        })
    }
}

fn hidden_field_name(node: &Node) -> Option<String> {
    match &node.role {
        Role::HiddenField { name } => Some(name.clone()),
        _ => None,
    }
}

fn hidden_field_for(container: &Node, ancestors: &[&Node]) -> Option<String> {
    let is_hidden = |r: &Role| matches!(r, Role::HiddenField { .. });

    if let Some(group) = ancestors
        .iter()
        .rev()
        .find(|node| node.role == Role::FormGroup)
    {
        if let Some(field) = group.find_descendant(&is_hidden) {
            return hidden_field_name(field);
        }
    }

    let parent = ancestors.last()?;
    parent
        .children
        .iter()
        .filter(|sibling| sibling.id != container.id)
        .find_map(hidden_field_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page() -> Node {
        Node::new("page", Role::Page)
            .child(
                Node::new("filters", Role::Form)
                    .child(Node::select_group("institution", "Institution", "institution_id", true))
                    .child(Node::dropdown("status", false))
                    .child(Node::new(
                        "status-value",
                        Role::HiddenField {
                            name: "status".into(),
                        },
                    )),
            )
            .child(
                Node::new("transfer", Role::ModalOverlay)
                    .child(Node::dropdown("destination", true)),
            )
    }

    #[test]
    fn resolves_full_group() {
        let binding = Binding::resolve(&page(), "institution").unwrap();
        assert_eq!(
            binding,
            Binding {
                container: "institution".into(),
                trigger: "institution-trigger".into(),
                panel: "institution-panel".into(),
                options_list: "institution-options".into(),
                display: "institution-display".into(),
                search_input: Some("institution-search".into()),
                hidden_field: Some("institution_id".into()),
                in_overlay: false,
            }
        );
    }

    #[test]
    fn hidden_field_falls_back_to_sibling() {
        let binding = Binding::resolve(&page(), "status").unwrap();
        assert_eq!(binding.hidden_field.as_deref(), Some("status"));
        assert_eq!(binding.search_input, None);
    }

    #[test]
    fn overlay_ancestor_is_detected() {
        let binding = Binding::resolve(&page(), "destination").unwrap();
        assert!(binding.in_overlay);
        assert_eq!(binding.hidden_field, None);
    }

    #[test]
    fn unknown_container() {
        assert_eq!(
            Binding::resolve(&page(), "nope"),
            Err(ConstructionError::ContainerNotFound("nope".into()))
        );
    }

    #[test]
    fn missing_required_part() {
        let page = Node::new("page", Role::Page).child(
            Node::new("broken", Role::Container)
                .child(Node::new("broken-trigger", Role::Trigger))
                .child(Node::new("broken-panel", Role::Panel)),
        );
        assert_eq!(
            Binding::resolve(&page, "broken"),
            Err(ConstructionError::MissingPart {
                container: "broken".into(),
                part: DropdownPart::OptionsList,
            })
        );
    }

    #[test]
    fn markup_deserializes_from_json() {
        let json = r#"{
            "id": "page", "kind": "page",
            "children": [
                {"id": "c", "kind": "container", "children": [
                    {"id": "t", "kind": "trigger", "children": [{"id": "d", "kind": "display"}]},
                    {"id": "p", "kind": "panel", "children": [{"id": "o", "kind": "options_list"}]}
                ]},
                {"id": "h", "kind": "hidden_field", "name": "regional_id"}
            ]
        }"#;
        let page: Node = serde_json::from_str(json).unwrap();
        let binding = Binding::resolve(&page, "c").unwrap();
        assert_eq!(binding.hidden_field.as_deref(), Some("regional_id"));
        assert_eq!(binding.display, "d");
    }
}
