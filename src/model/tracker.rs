//! Scope tracking for model declarations.
//!
//! Two LIFO stacks live for the duration of one draw pass: namespaces opened
//! on behalf of model declarations, and the model declarations themselves.
//! Each frame carries a FIFO queue of deferred work that runs right after the
//! frame's block finishes.

use crate::error::RouteError;
use tracing::trace;

/// Deferred router work, run once when its owning frame closes.
pub type Thunk<R> = Box<dyn FnOnce(&mut R) -> Result<(), RouteError>>;

/// An open namespace scope.
pub struct NamespaceFrame<R> {
    name: String,
    pending: Vec<Thunk<R>>,
}

impl<R> NamespaceFrame<R> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queue work to run after this namespace closes.
    pub fn defer(&mut self, thunk: Thunk<R>) {
        self.pending.push(thunk);
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn into_pending(self) -> Vec<Thunk<R>> {
        self.pending
    }
}

/// An open model declaration.
pub struct ModelFrame<R> {
    path: Vec<String>,
    opened: Vec<String>,
    pending: Vec<Thunk<R>>,
}

impl<R> ModelFrame<R> {
    /// Full underscored path, namespaces first, model name last.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn model_name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    /// Namespace segments of the model path (everything but the name).
    pub fn namespace_path(&self) -> &[String] {
        self.path.split_last().map(|(_, ns)| ns).unwrap_or_default()
    }

    /// Namespaces this model opened around its own resource, oldest first.
    /// Empty when it declared itself inside already open scopes.
    pub fn opened(&self) -> &[String] {
        &self.opened
    }

    pub fn set_opened(&mut self, namespaces: Vec<String>) {
        self.opened = namespaces;
    }

    /// Queue work to run after this model declaration finishes.
    pub fn defer(&mut self, thunk: Thunk<R>) {
        self.pending.push(thunk);
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn into_pending(self) -> Vec<Thunk<R>> {
        self.pending
    }
}

/// Namespace and model stacks for one draw pass.
pub struct ScopeTracker<R> {
    namespaces: Vec<NamespaceFrame<R>>,
    models: Vec<ModelFrame<R>>,
}

impl<R> Default for ScopeTracker<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ScopeTracker<R> {
    pub fn new() -> Self {
        ScopeTracker {
            namespaces: Vec::new(),
            models: Vec::new(),
        }
    }

    pub fn push_namespace(&mut self, name: impl Into<String>) -> &mut NamespaceFrame<R> {
        let name = name.into();
        trace!(namespace = %name, depth = self.namespaces.len() + 1, "Push namespace frame");
        self.namespaces.push(NamespaceFrame {
            name,
            pending: Vec::new(),
        });
        let top = self.namespaces.len() - 1;
        &mut self.namespaces[top]
    }

    /// Pop the newest namespace frame. The caller drains its pending work.
    pub fn pop_namespace(&mut self) -> Option<NamespaceFrame<R>> {
        let frame = self.namespaces.pop();
        if let Some(frame) = &frame {
            trace!(namespace = %frame.name, pending = frame.pending.len(), "Pop namespace frame");
        }
        frame
    }

    pub fn push_model(&mut self, path: Vec<String>) -> &mut ModelFrame<R> {
        trace!(model = %path.join("/"), depth = self.models.len() + 1, "Push model frame");
        self.models.push(ModelFrame {
            path,
            opened: Vec::new(),
            pending: Vec::new(),
        });
        let top = self.models.len() - 1;
        &mut self.models[top]
    }

    /// Pop the newest model frame. The caller drains its pending work.
    pub fn pop_model(&mut self) -> Option<ModelFrame<R>> {
        let frame = self.models.pop();
        if let Some(frame) = &frame {
            trace!(model = %frame.path.join("/"), pending = frame.pending.len(), "Pop model frame");
        }
        frame
    }

    pub fn namespace_depth(&self) -> usize {
        self.namespaces.len()
    }

    pub fn model_depth(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty() && self.models.is_empty()
    }

    /// Names of the open namespaces, oldest first.
    pub fn namespace_names(&self) -> Vec<&str> {
        self.namespaces.iter().map(|f| f.name.as_str()).collect()
    }

    /// The newest model declaration.
    pub fn current_model_mut(&mut self) -> Option<&mut ModelFrame<R>> {
        self.models.last_mut()
    }

    /// The model whose block encloses the newest model declaration.
    pub fn enclosing_model(&self) -> Option<&ModelFrame<R>> {
        let index = self.models.len().checked_sub(2)?;
        self.models.get(index)
    }

    pub fn enclosing_model_mut(&mut self) -> Option<&mut ModelFrame<R>> {
        let index = self.models.len().checked_sub(2)?;
        self.models.get_mut(index)
    }

    /// Namespace frame `depth` levels from the top (1 is the newest).
    pub fn namespace_from_top_mut(&mut self, depth: usize) -> Option<&mut NamespaceFrame<R>> {
        if depth == 0 {
            return None;
        }
        let index = self.namespaces.len().checked_sub(depth)?;
        self.namespaces.get_mut(index)
    }

    /// Trailing part of `requested` that is not already open.
    ///
    /// The candidate is shortened from the tail until it matches the newest
    /// open namespaces exactly; the segments cut off along the way are the
    /// ones that still need to be opened.
    pub fn deduplicate_namespaces(&self, requested: &[String]) -> Vec<String> {
        let open = self.namespace_names();
        let mut candidate: Vec<&str> = requested.iter().map(String::as_str).collect();
        let mut still_needed: Vec<String> = Vec::new();

        while let Some(last) = candidate.last().copied() {
            let n = candidate.len();
            if open.len() >= n && open[open.len() - n..] == candidate[..] {
                return still_needed;
            }
            still_needed.insert(0, last.to_string());
            candidate.pop();
        }

        still_needed
    }

    /// Namespaces of the enclosing model that the new model does not share.
    ///
    /// Only the immediately enclosing model is consulted. The common leading
    /// segments of its namespace path and `candidate` are dropped and the
    /// rest of the enclosing model's namespace path is returned.
    pub fn namespaces_to_eject(&self, candidate: &[String]) -> Vec<String> {
        let Some(parent) = self.enclosing_model() else {
            return Vec::new();
        };
        let parent_namespaces = parent.namespace_path();
        let shared = parent_namespaces
            .iter()
            .zip(candidate)
            .take_while(|(p, c)| p == c)
            .count();
        parent_namespaces[shared..].to_vec()
    }
}
