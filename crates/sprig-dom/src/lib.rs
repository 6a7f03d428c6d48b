//! The node arena Sprig's tree builder writes into.
//!
//! Every node lives in one `Vec` owned by [`DomTree`] and is addressed by
//! its [`NodeId`]. Parent, child and sibling links are stored as ids, so the
//! parser can hold on to nodes (the stack of open elements, the list of
//! active formatting elements, the head and form pointers) while it keeps
//! mutating the tree. Nodes are never freed. Removing one only unlinks it.
//!
//! Two elements with the same name and attributes are still different
//! nodes: comparisons are always by id.

use std::iter;

use serde::Serialize;

/// Index of a node in its [`DomTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The Document. Slot 0 of every tree.
    pub const ROOT: Self = Self(0);
}

/// [§ 1.2 Namespaces](https://infra.spec.whatwg.org/#namespaces)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Namespace {
    /// "The HTML namespace is "http://www.w3.org/1999/xhtml"."
    Html,
    /// "The MathML namespace is "http://www.w3.org/1998/Math/MathML"."
    MathMl,
    /// "The SVG namespace is "http://www.w3.org/2000/svg"."
    Svg,
    /// "The XLink namespace is "http://www.w3.org/1999/xlink"."
    XLink,
    /// "The XML namespace is "http://www.w3.org/XML/1998/namespace"."
    Xml,
    /// "The XMLNS namespace is "http://www.w3.org/2000/xmlns/"."
    Xmlns,
}

impl Namespace {
    /// The namespace URL.
    #[must_use]
    pub const fn url(self) -> &'static str {
        match self {
            Self::Html => "http://www.w3.org/1999/xhtml",
            Self::MathMl => "http://www.w3.org/1998/Math/MathML",
            Self::Svg => "http://www.w3.org/2000/svg",
            Self::XLink => "http://www.w3.org/1999/xlink",
            Self::Xml => "http://www.w3.org/XML/1998/namespace",
            Self::Xmlns => "http://www.w3.org/2000/xmlns/",
        }
    }

    /// Prefix used by the html5lib tree dump (`svg`, `math`, `xlink`, ...).
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::MathMl => "math",
            Self::Svg => "svg",
            Self::XLink => "xlink",
            Self::Xml => "xml",
            Self::Xmlns => "xmlns",
        }
    }
}

/// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#concept-document-mode)
///
/// Picked by the parser from the DOCTYPE token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum QuirksMode {
    /// "no-quirks"
    #[default]
    NoQuirks,
    /// "limited-quirks"
    LimitedQuirks,
    /// "quirks"
    Quirks,
}

/// [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
///
/// Attributes from the tokenizer carry no namespace. Foreign content
/// adjustment fills in `prefix` and `namespace` for `xlink:href` and
/// friends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomAttribute {
    /// "local name"
    pub name: String,
    /// "namespace prefix"
    pub prefix: Option<String>,
    /// "namespace"
    pub namespace: Option<Namespace>,
    /// "value"
    pub value: String,
}

impl DomAttribute {
    /// An attribute in no namespace.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            namespace: None,
            value: value.into(),
        }
    }

    /// "An attribute's qualified name is its local name if its namespace
    /// prefix is null, and its namespace prefix, followed by ":", followed by
    /// its local name, otherwise."
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// An element's attribute list, in source order.
///
/// No-namespace names are unique: the tokenizer drops repeated names and
/// [`Self::set`] overwrites in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributesMap {
    entries: Vec<DomAttribute>,
}

impl AttributesMap {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// [§ 4.9 get an attribute by name](https://dom.spec.whatwg.org/#concept-element-attributes-get-by-name)
    ///
    /// "Return the first attribute in element's attribute list whose
    /// qualified name is qualifiedName; otherwise null."
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|attr| attr.qualified_name() == name)
            .map(|attr| attr.value.as_str())
    }

    /// [§ 4.9 get an attribute by namespace and local name](https://dom.spec.whatwg.org/#concept-element-attributes-get-by-namespace)
    #[must_use]
    pub fn get_ns(&self, namespace: Option<Namespace>, local_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|attr| attr.namespace == namespace && attr.name == local_name)
            .map(|attr| attr.value.as_str())
    }

    /// Whether `name` is present, matched by qualified name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Overwrite the value of the no-namespace attribute `name`, or add it
    /// at the end.
    pub fn set(&mut self, name: &str, value: &str) {
        match self
            .entries
            .iter_mut()
            .find(|attr| attr.namespace.is_none() && attr.name == name)
        {
            Some(existing) => value.clone_into(&mut existing.value),
            None => self.entries.push(DomAttribute::new(name, value)),
        }
    }

    /// Add at the end. Duplicates are the caller's problem.
    pub fn push(&mut self, attribute: DomAttribute) {
        self.entries.push(attribute);
    }

    /// Attributes in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, DomAttribute> {
        self.entries.iter()
    }

    /// Number of attributes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are none.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a AttributesMap {
    type Item = &'a DomAttribute;
    type IntoIter = std::slice::Iter<'a, DomAttribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<DomAttribute> for AttributesMap {
    fn from_iter<I: IntoIterator<Item = DomAttribute>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// One arena slot: the node's payload plus its links.
///
/// `children`, `next_sibling` and `prev_sibling` always agree. Only the
/// [`DomTree`] mutators touch them.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    /// What kind of node this is, with its data.
    pub node_type: NodeType,
    /// [parent](https://dom.spec.whatwg.org/#concept-tree-parent), `None` when detached.
    pub parent: Option<NodeId>,
    /// [children](https://dom.spec.whatwg.org/#concept-tree-child) in tree order.
    pub children: Vec<NodeId>,
    /// [next sibling](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    pub next_sibling: Option<NodeId>,
    /// [previous sibling](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    pub prev_sibling: Option<NodeId>,
}

impl Node {
    const fn detached(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        }
    }
}

/// The node kinds tree construction produces.
#[derive(Debug, Clone, Serialize)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.7 Interface DocumentFragment](https://dom.spec.whatwg.org/#interface-documentfragment)
    ///
    /// Template contents, and the root handed back by fragment parsing.
    DocumentFragment,
    /// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
    Doctype(DoctypeData),
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    ///
    /// Adjacent character tokens land in one text node.
    Text(String),
    /// [§ 4.14 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
}

/// "Doctypes have an associated name, public ID, and system ID."
///
/// Missing identifiers are stored as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DoctypeData {
    /// "name"
    pub name: String,
    /// "public ID"
    pub public_id: String,
    /// "system ID"
    pub system_id: String,
}

/// Per-element state the HTML parser reads and writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ElementFlags {
    /// [§ 4.12.1.1](https://html.spec.whatwg.org/multipage/scripting.html#already-started)
    /// "A script element has a flag indicating whether the element has been
    /// "already started"."
    pub already_started: bool,
    /// "parser document": set when the parser created and inserted the element.
    pub parser_inserted: bool,
}

/// An element's name, namespace and attributes.
#[derive(Debug, Clone, Serialize)]
pub struct ElementData {
    /// Local name, lowercased for HTML and case-adjusted for SVG.
    pub tag_name: String,
    /// Namespace the element was created in.
    pub namespace: Namespace,
    /// Attribute list.
    pub attrs: AttributesMap,
    /// [§ 4.12.3](https://html.spec.whatwg.org/multipage/scripting.html#template-contents)
    /// "Each template element has an associated DocumentFragment object that
    /// is its template contents."
    pub template_contents: Option<NodeId>,
    /// Parser-visible flags.
    pub flags: ElementFlags,
}

impl ElementData {
    /// Element data with no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            tag_name: tag_name.into(),
            namespace,
            attrs: AttributesMap::new(),
            template_contents: None,
            flags: ElementFlags::default(),
        }
    }

    /// Namespace and local name both match.
    #[must_use]
    pub fn is(&self, namespace: Namespace, tag_name: &str) -> bool {
        self.namespace == namespace && self.tag_name == tag_name
    }

    /// Shorthand for [`Self::is`] in the HTML namespace.
    #[must_use]
    pub fn is_html(&self, tag_name: &str) -> bool {
        self.is(Namespace::Html, tag_name)
    }

    /// The `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id")
    }
}

/// [§ 4.2 Node tree](https://dom.spec.whatwg.org/#node-trees)
///
/// The arena. Slot 0 holds the Document. Lookups with an id from another
/// tree return `None` or an empty slice rather than panicking; the
/// mutators expect ids this tree handed out.
#[derive(Debug, Clone, Serialize)]
pub struct DomTree {
    nodes: Vec<Node>,
    quirks_mode: QuirksMode,
}

impl DomTree {
    /// A tree holding only the Document, in no-quirks mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::detached(NodeType::Document)],
            quirks_mode: QuirksMode::NoQuirks,
        }
    }

    /// Always [`NodeId::ROOT`].
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The document's mode.
    #[must_use]
    pub const fn quirks_mode(&self) -> QuirksMode {
        self.quirks_mode
    }

    /// Change the document's mode.
    pub const fn set_quirks_mode(&mut self, mode: QuirksMode) {
        self.quirks_mode = mode;
    }

    /// The slot for `id`.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Mutable slot for `id`.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Slots in the arena, attached or not.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true for a tree made by [`Self::new`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ===== creation =====

    /// Put `node_type` in a fresh detached slot.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        self.nodes.push(Node::detached(node_type));
        NodeId(self.nodes.len() - 1)
    }

    /// [§ 4.5 createElementNS](https://dom.spec.whatwg.org/#dom-document-createelementns)
    ///
    /// A detached element. An HTML `template` also gets its contents
    /// fragment, allocated just before the element.
    pub fn create_element(
        &mut self,
        tag_name: &str,
        namespace: Namespace,
        attrs: AttributesMap,
    ) -> NodeId {
        let template_contents = (namespace == Namespace::Html && tag_name == "template")
            .then(|| self.create_fragment());
        self.alloc(NodeType::Element(ElementData {
            tag_name: tag_name.to_string(),
            namespace,
            attrs,
            template_contents,
            flags: ElementFlags::default(),
        }))
    }

    /// [§ 4.5 createTextNode](https://dom.spec.whatwg.org/#dom-document-createtextnode)
    pub fn create_text(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Text(data.to_string()))
    }

    /// [§ 4.5 createComment](https://dom.spec.whatwg.org/#dom-document-createcomment)
    pub fn create_comment(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Comment(data.to_string()))
    }

    /// [§ 4.5.1 createDocumentType](https://dom.spec.whatwg.org/#dom-domimplementation-createdocumenttype)
    pub fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.alloc(NodeType::Doctype(DoctypeData {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        }))
    }

    /// [§ 4.5 createDocumentFragment](https://dom.spec.whatwg.org/#dom-document-createdocumentfragment)
    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(NodeType::DocumentFragment)
    }

    // ===== mutation =====

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Make `child` the last child of `parent`, taking it away from its
    /// current parent if it has one.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        let index = self.nodes[parent.0].children.len();
        self.link(parent, child, index);
    }

    /// [§ 4.2.2 Insert](https://dom.spec.whatwg.org/#concept-node-insert)
    ///
    /// Put `child` right before `reference`. Falls back to appending when
    /// `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        self.detach(child);
        let children = &self.nodes[parent.0].children;
        let index = children
            .iter()
            .position(|&id| id == reference)
            .unwrap_or(children.len());
        self.link(parent, child, index);
    }

    /// [§ 4.2.3 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// No-op unless `child` is currently under `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.parent(child) == Some(parent) {
            self.detach(child);
        }
    }

    /// Unlink `child` from its parent and siblings. Detached nodes are left
    /// alone.
    pub fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.nodes[child.0].parent.take() else {
            return;
        };
        let prev = self.nodes[child.0].prev_sibling.take();
        let next = self.nodes[child.0].next_sibling.take();

        self.nodes[parent.0].children.retain(|&id| id != child);
        if let Some(prev) = prev {
            self.nodes[prev.0].next_sibling = next;
        }
        if let Some(next) = next {
            self.nodes[next.0].prev_sibling = prev;
        }
    }

    /// Reparent every child of `from` onto the end of `to`, in order. Used by
    /// the adoption agency algorithm.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        let moved = std::mem::take(&mut self.nodes[from.0].children);
        for child in moved {
            let node = &mut self.nodes[child.0];
            node.parent = None;
            node.prev_sibling = None;
            node.next_sibling = None;
            self.append_child(to, child);
        }
    }

    /// Extend a text node. Other node kinds are ignored.
    pub fn append_text(&mut self, id: NodeId, data: &str) {
        if let Some(Node {
            node_type: NodeType::Text(text),
            ..
        }) = self.get_mut(id)
        {
            text.push_str(data);
        }
    }

    /// [`AttributesMap::set`] on an element. Other node kinds are ignored.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(element) = self.as_element_mut(id) {
            element.attrs.set(name, value);
        }
    }

    /// [§ 4.9 getAttribute](https://dom.spec.whatwg.org/#dom-element-getattribute)
    #[must_use]
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id)?.attrs.get(name)
    }

    /// Splice a detached `child` into `parent` at `index`, fixing both
    /// neighbours' sibling links.
    fn link(&mut self, parent: NodeId, child: NodeId, index: usize) {
        let children = &mut self.nodes[parent.0].children;
        let prev = index.checked_sub(1).map(|i| children[i]);
        let next = children.get(index).copied();
        children.insert(index, child);

        if let Some(prev) = prev {
            self.nodes[prev.0].next_sibling = Some(child);
        }
        if let Some(next) = next {
            self.nodes[next.0].prev_sibling = Some(child);
        }
        let node = &mut self.nodes[child.0];
        node.parent = Some(parent);
        node.prev_sibling = prev;
        node.next_sibling = next;
    }

    // ===== navigation =====

    /// Parent of `id`, if attached.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Child ids in tree order. Empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// First child of `id`.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Last child of `id`.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Sibling after `id`.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.next_sibling
    }

    /// Sibling before `id`.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.prev_sibling
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Strict: a node is not its own descendant.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Parent, grandparent, ... up to the root of whatever tree `id` is in.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        iter::successors(self.parent(id), |&current| self.parent(current))
    }

    /// Siblings before `id`, nearest first.
    pub fn preceding_siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        iter::successors(self.prev_sibling(id), |&current| self.prev_sibling(current))
    }

    // ===== queries =====

    /// Element data, when `id` is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.get(id)?.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Mutable element data, when `id` is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.get_mut(id)?.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Data of a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.node_type {
            NodeType::Text(data) => Some(data.as_str()),
            _ => None,
        }
    }

    /// The contents fragment of a `template` element.
    #[must_use]
    pub fn template_contents(&self, id: NodeId) -> Option<NodeId> {
        self.as_element(id)?.template_contents
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// The first element child of the Document.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.first_element_child(NodeId::ROOT, |_| true)
    }

    /// [§ 3.1.3 The head element](https://html.spec.whatwg.org/multipage/dom.html#the-head-element-2)
    ///
    /// The first HTML `head` child of the document element.
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.first_element_child(html, |e| e.is_html("head"))
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// The first HTML `body` or `frameset` child of the document element.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.first_element_child(html, |e| e.is_html("body") || e.is_html("frameset"))
    }

    /// Text of every text node under `id`, in tree order. Template contents
    /// are not included.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn first_element_child(
        &self,
        parent: NodeId,
        matches: impl Fn(&ElementData) -> bool,
    ) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&id| self.as_element(id).is_some_and(&matches))
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(text) = self.as_text(id) {
            out.push_str(text);
        }
        for &child in self.children(id) {
            self.collect_text(child, out);
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
