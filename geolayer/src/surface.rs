//! Map surfaces that display [`GeoJsonLayer`]s.
//!
//! The crate does not render anything itself. A rendering engine implements [`MapSurface`] to
//! receive layers. [`LayerCollection`] is an in-memory implementation that keeps layers in the
//! order they are drawn.

use std::fmt::{Display, Formatter};

use crate::layer::GeoJsonLayer;

/// Identifier of a layer added to a [`MapSurface`].
///
/// Identifiers are never reused by a surface, so an identifier of a removed layer does not refer
/// to any later layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl Display for LayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// Something a layer can be displayed on.
pub trait MapSurface {
    /// Adds the layer on top of the existing ones.
    fn add_layer(&mut self, layer: GeoJsonLayer) -> LayerId;
    /// Removes the layer, returning it. `None` if there is no layer with this id.
    fn remove_layer(&mut self, id: LayerId) -> Option<GeoJsonLayer>;
    /// Layer with the given id.
    fn layer(&self, id: LayerId) -> Option<&GeoJsonLayer>;
    /// Mutable layer with the given id, e.g. to change its style.
    fn layer_mut(&mut self, id: LayerId) -> Option<&mut GeoJsonLayer>;
}

/// Ordered collection of layers.
///
/// Layers are drawn in the order they were added. Any layer can be temporarily hidden with
/// [`LayerCollection::hide`]. Hidden layers retain their place in the collection, but are skipped
/// by [`LayerCollection::iter_visible`].
///
/// ```
/// use geolayer::surface::{LayerCollection, MapSurface};
///
/// let mut collection = LayerCollection::default();
/// let id = collection.add_layer(geolayer::parse(r#"{"type": "Point", "coordinates": [1, 2]}"#)?);
/// collection.hide(id);
/// assert_eq!(collection.iter_visible().count(), 0);
/// # Ok::<(), geolayer::error::GeoJsonError>(())
/// ```
#[derive(Debug, Default)]
pub struct LayerCollection {
    entries: Vec<LayerEntry>,
    next_id: u64,
}

#[derive(Debug)]
struct LayerEntry {
    id: LayerId,
    layer: GeoJsonLayer,
    is_hidden: bool,
}

impl LayerCollection {
    /// Number of layers, including hidden ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection has no layers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all layers from the collection.
    pub fn clear(&mut self) {
        self.entries.clear()
    }

    /// Ids of all layers in drawing order.
    pub fn ids(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.entries.iter().map(|entry| entry.id)
    }

    /// Iterates over all layers in drawing order.
    pub fn iter(&self) -> impl Iterator<Item = (LayerId, &GeoJsonLayer)> + '_ {
        self.entries.iter().map(|entry| (entry.id, &entry.layer))
    }

    /// Iterates over layers that are not hidden.
    pub fn iter_visible(&self) -> impl Iterator<Item = (LayerId, &GeoJsonLayer)> + '_ {
        self.entries
            .iter()
            .filter(|entry| !entry.is_hidden)
            .map(|entry| (entry.id, &entry.layer))
    }

    /// Sets the layer as hidden. Returns false if there is no such layer.
    pub fn hide(&mut self, id: LayerId) -> bool {
        self.set_hidden(id, true)
    }

    /// Sets the layer as visible. Returns false if there is no such layer.
    pub fn show(&mut self, id: LayerId) -> bool {
        self.set_hidden(id, false)
    }

    /// Sets all layers for which the predicate returns true as visible. The rest of layers are set
    /// as hidden.
    pub fn show_by<F>(&mut self, mut f: F)
    where
        F: FnMut(&GeoJsonLayer) -> bool,
    {
        for entry in &mut self.entries {
            entry.is_hidden = !f(&entry.layer);
        }
    }

    /// Whether the layer is visible. `None` if there is no such layer.
    pub fn is_visible(&self, id: LayerId) -> Option<bool> {
        self.entry(id).map(|entry| !entry.is_hidden)
    }

    fn set_hidden(&mut self, id: LayerId, is_hidden: bool) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.is_hidden = is_hidden;
                true
            }
            None => false,
        }
    }

    fn entry(&self, id: LayerId) -> Option<&LayerEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }
}

impl MapSurface for LayerCollection {
    fn add_layer(&mut self, layer: GeoJsonLayer) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        log::debug!("Adding {id} with {} features", layer.len());
        self.entries.push(LayerEntry {
            id,
            layer,
            is_hidden: false,
        });

        id
    }

    fn remove_layer(&mut self, id: LayerId) -> Option<GeoJsonLayer> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index).layer)
    }

    fn layer(&self, id: LayerId) -> Option<&GeoJsonLayer> {
        self.entry(id).map(|entry| &entry.layer)
    }

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut GeoJsonLayer> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.layer)
    }
}
