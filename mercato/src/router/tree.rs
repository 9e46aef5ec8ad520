use std::collections::BTreeMap;

use mercato_core::{MercatoError, ModelId, ProviderInterface};

use super::introspect::RouteInfo;

/// A leaf in the route tree: a unique path bound to one model.
#[derive(Debug, Clone)]
pub(crate) struct Route {
    pub path: String,
    pub model: ModelId,
}

#[derive(Debug)]
enum Node {
    Menu(BTreeMap<String, Node>),
    Command(Route),
}

/// Hierarchical tree of routes. Internal nodes are sub-menus enumerating
/// their children; leaves are commands bound to models.
#[derive(Debug)]
pub(crate) struct Router {
    root: BTreeMap<String, Node>,
}

impl Router {
    /// Build the tree from `(path, model)` bindings, validating path shape,
    /// uniqueness, and that every bound model exists in the interface.
    pub(crate) fn new(
        routes: &[(String, ModelId)],
        interface: &ProviderInterface,
    ) -> Result<Self, MercatoError> {
        if routes.is_empty() {
            return Err(MercatoError::schema(
                "no routes bound; add at least one via route(...)",
            ));
        }
        let mut root = BTreeMap::new();
        for (path, model) in routes {
            let segments = parse_path(path)?;
            if interface.model(*model).is_none() {
                return Err(MercatoError::schema(format!(
                    "route `{path}` binds unregistered model `{model}`"
                )));
            }
            insert(&mut root, path, &segments, *model)?;
        }
        Ok(Self { root })
    }

    /// Resolve a path to its route.
    pub(crate) fn resolve(&self, path: &str) -> Result<&Route, MercatoError> {
        let segments = parse_path(path)?;
        let mut current = &self.root;
        let (leaf, menus) = segments.split_last().expect("parse_path rejects empty paths");
        for segment in menus {
            match current.get(*segment) {
                Some(Node::Menu(children)) => current = children,
                _ => return Err(unknown_route(path)),
            }
        }
        match current.get(*leaf) {
            Some(Node::Command(route)) => Ok(route),
            _ => Err(unknown_route(path)),
        }
    }

    /// Every route in path order, with providers and description.
    pub(crate) fn list(&self, interface: &ProviderInterface) -> Vec<RouteInfo> {
        let mut out = Vec::new();
        collect(&self.root, interface, &mut out);
        out
    }
}

fn collect(nodes: &BTreeMap<String, Node>, interface: &ProviderInterface, out: &mut Vec<RouteInfo>) {
    for node in nodes.values() {
        match node {
            Node::Menu(children) => collect(children, interface, out),
            Node::Command(route) => {
                let model = interface
                    .model(route.model)
                    .expect("routes are validated at build time");
                out.push(RouteInfo {
                    path: route.path.clone(),
                    model: route.model,
                    providers: model.providers.clone(),
                    description: model.description.clone(),
                });
            }
        }
    }
}

fn parse_path(path: &str) -> Result<Vec<&str>, MercatoError> {
    let Some(rest) = path.strip_prefix('/') else {
        return Err(MercatoError::validation(
            path,
            "route paths start with `/`",
        ));
    };
    let segments: Vec<&str> = rest.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(MercatoError::validation(path, "empty route path segment"));
    }
    Ok(segments)
}

fn unknown_route(path: &str) -> MercatoError {
    MercatoError::validation(path, "unknown route")
}

fn insert(
    nodes: &mut BTreeMap<String, Node>,
    full_path: &str,
    segments: &[&str],
    model: ModelId,
) -> Result<(), MercatoError> {
    match segments {
        [] => Ok(()),
        [leaf] => {
            if nodes.contains_key(*leaf) {
                return Err(MercatoError::schema(format!(
                    "duplicate or conflicting route `{full_path}`"
                )));
            }
            nodes.insert(
                (*leaf).to_string(),
                Node::Command(Route {
                    path: full_path.to_string(),
                    model,
                }),
            );
            Ok(())
        }
        [head, rest @ ..] => {
            let entry = nodes
                .entry((*head).to_string())
                .or_insert_with(|| Node::Menu(BTreeMap::new()));
            match entry {
                Node::Menu(children) => insert(children, full_path, rest, model),
                Node::Command(_) => Err(MercatoError::schema(format!(
                    "route `{full_path}` conflicts with an existing command at `{head}`"
                ))),
            }
        }
    }
}
