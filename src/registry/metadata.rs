//! Typed metadata attached to endpoints at registration time.

use std::any::type_name;

use axum::http::Method;

/// HTTP verbs an endpoint accepts, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpMethodMetadata {
    /// Accepted verbs.
    pub methods: Vec<Method>,
}

impl HttpMethodMetadata {
    /// Metadata for a single verb.
    pub fn single(method: Method) -> Self {
        Self {
            methods: vec![method],
        }
    }

    /// First declared verb, if any.
    pub fn first(&self) -> Option<&Method> {
        self.methods.first()
    }
}

/// Free-form tags used to group endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagsMetadata {
    /// Tag names.
    pub tags: Vec<String>,
}

impl TagsMetadata {
    /// Create tag metadata from anything string-like.
    pub fn new<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Identity token of this metadata kind.
    pub fn type_id(&self) -> &'static str {
        type_name::<Self>()
    }
}

/// Operation-level documentation annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationDoc {
    /// Short summary.
    pub summary: Option<String>,
    /// Longer description.
    pub description: Option<String>,
    /// Unique operation identifier.
    pub operation_id: Option<String>,
    /// Documentation tags. `None` when the annotation declares none.
    pub tags: Option<Vec<String>>,
}

impl OperationDoc {
    /// Empty annotation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the summary.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the operation id.
    pub fn operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    /// Set the documentation tags.
    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Identity token of this metadata kind.
    pub fn type_id(&self) -> &'static str {
        type_name::<Self>()
    }
}

/// Describes a handler that lives as a method on a controller type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerAction {
    /// Short controller name (e.g. `Weather` for `WeatherController`).
    pub controller_name: String,
    /// Action name, usually the method name.
    pub action_name: String,
    /// Fully qualified controller type path.
    pub controller_type: String,
    /// Name of the handler method.
    pub method_name: String,
}

impl ControllerAction {
    /// Build an action descriptor for method `method_name` on controller `C`.
    ///
    /// The controller name is the last path segment of `C` with a trailing
    /// `Controller` suffix removed.
    pub fn of<C: ?Sized>(method_name: impl Into<String>) -> Self {
        let controller_type = type_name::<C>().to_string();
        let short = controller_type
            .rsplit("::")
            .next()
            .unwrap_or(controller_type.as_str());
        let controller_name = match short.strip_suffix("Controller") {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => short,
        }
        .to_string();
        let method_name = method_name.into();

        Self {
            controller_name,
            action_name: method_name.clone(),
            controller_type,
            method_name,
        }
    }

    /// Override the action name.
    pub fn with_action_name(mut self, action_name: impl Into<String>) -> Self {
        self.action_name = action_name.into();
        self
    }
}

/// Typed metadata record for a single endpoint.
///
/// Each kind holds at most one value. Setters keep the first value
/// registered and ignore later ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointMetadata {
    /// Accepted HTTP verbs.
    pub http_methods: Option<HttpMethodMetadata>,
    /// Endpoint name.
    pub name: Option<String>,
    /// Human-readable description.
    pub description: Option<String>,
    /// Documentation catalog the endpoint belongs to.
    pub group_name: Option<String>,
    /// Grouping tags.
    pub tags: Option<TagsMetadata>,
    /// Operation documentation.
    pub operation: Option<OperationDoc>,
    /// Controller action, for controller-style handlers.
    pub controller: Option<ControllerAction>,
}

impl EndpointMetadata {
    pub(crate) fn set_http_methods(&mut self, methods: HttpMethodMetadata) {
        self.http_methods.get_or_insert(methods);
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name.get_or_insert(name);
    }

    pub(crate) fn set_description(&mut self, description: String) {
        self.description.get_or_insert(description);
    }

    pub(crate) fn set_group_name(&mut self, group_name: String) {
        self.group_name.get_or_insert(group_name);
    }

    pub(crate) fn set_tags(&mut self, tags: TagsMetadata) {
        self.tags.get_or_insert(tags);
    }

    pub(crate) fn set_operation(&mut self, operation: OperationDoc) {
        self.operation.get_or_insert(operation);
    }

    pub(crate) fn set_controller(&mut self, controller: ControllerAction) {
        self.controller.get_or_insert(controller);
    }
}
