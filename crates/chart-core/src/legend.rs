// File: crates/chart-core/src/legend.rs
// Summary: Legend items and axis label shapes registered per series.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use tracing::trace;

use crate::axis::AxisId;
use crate::geometry::Shape;
use crate::interaction;
use crate::scene::{EventKind, Listener, NodeId, Scene};
use crate::series::Series;
use crate::session::SessionState;
use crate::types::CLASS_LEGEND_ITEM;

const SWATCH_SIZE: f64 = 10.0;
const ITEM_SPACING: f64 = 96.0;

/// Legend items by series key, in registration order.
#[derive(Debug)]
pub struct Legend {
    group: NodeId,
    items: IndexMap<String, NodeId>,
}

impl Legend {
    pub fn new(group: NodeId) -> Self {
        Self { group, items: IndexMap::new() }
    }

    pub fn group(&self) -> NodeId {
        self.group
    }

    pub fn item(&self, key: &str) -> Option<NodeId> {
        self.items.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add (or refresh) the legend item of `series`.
    ///
    /// Series without a label, or with a hidden one, get no item. `shown`
    /// seeds `aria-current`. Listeners hold only a weak session handle.
    pub fn register(
        &mut self,
        scene: &mut Scene,
        session: Weak<RefCell<SessionState>>,
        series: &Series,
        shown: bool,
    ) -> Option<NodeId> {
        let label = series.label.as_ref().filter(|l| !l.is_hidden)?;
        let item = match self.items.get(&series.key) {
            Some(&item) => {
                scene.clear_children(item);
                item
            }
            None => {
                let item = scene.append(self.group, "g");
                scene.add_class(item, CLASS_LEGEND_ITEM);
                scene.set_key(item, series.key.clone());
                self.items.insert(series.key.clone(), item);
                item
            }
        };
        scene.set_attr(item, "role", "listitem");
        scene.set_attr(item, "aria-describedby", &series.key);
        scene.set_attr(item, "aria-current", shown);

        let swatch = scene.append(item, "rect");
        scene.set_attr(swatch, "width", SWATCH_SIZE);
        scene.set_attr(swatch, "height", SWATCH_SIZE);
        scene.set_attr(swatch, "fill", &series.color);
        let text = scene.append(item, "text");
        scene.set_attr(text, "x", SWATCH_SIZE + 4.0);
        scene.set_attr(text, "y", SWATCH_SIZE);
        scene.set_text(text, label.display.clone());

        let key = series.key.clone();
        scene.on(item, EventKind::Click, legend_listener(session.clone(), key.clone(), |st, k| {
            interaction::toggle_series(st, k);
        }));
        scene.on(item, EventKind::MouseEnter, legend_listener(session.clone(), key.clone(), interaction::highlight_series));
        scene.on(item, EventKind::MouseLeave, legend_listener(session, key, |st, _| interaction::clear_highlight(st)));
        self.layout(scene);
        trace!(key = %series.key, "legend item registered");
        Some(item)
    }

    pub fn deregister(&mut self, scene: &mut Scene, key: &str) -> bool {
        match self.items.shift_remove(key) {
            Some(item) => {
                scene.remove(item);
                self.layout(scene);
                true
            }
            None => false,
        }
    }

    fn layout(&self, scene: &mut Scene) {
        for (i, item) in self.items.values().enumerate() {
            scene.set_attr(*item, "transform", format!("translate({},0)", i as f64 * ITEM_SPACING));
        }
    }
}

fn legend_listener(
    session: Weak<RefCell<SessionState>>,
    key: String,
    action: impl Fn(&mut SessionState, &str) + 'static,
) -> Listener {
    Rc::new(move |_| {
        if let Some(state) = session.upgrade() {
            let mut st = state.borrow_mut();
            action(&mut *st, &key);
        }
    })
}

/// Shape shown next to an axis label for one series.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelShape {
    pub axis: AxisId,
    pub shape: Shape,
    pub color: String,
}

/// Label shapes by series key.
#[derive(Debug, Default)]
pub struct LabelShapes {
    shapes: IndexMap<String, LabelShape>,
}

impl LabelShapes {
    pub fn register(&mut self, axis: AxisId, key: &str, shape: Shape, color: &str) {
        self.shapes.insert(key.to_string(), LabelShape { axis, shape, color: color.to_string() });
    }

    pub fn deregister(&mut self, key: &str) -> bool {
        self.shapes.shift_remove(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&LabelShape> {
        self.shapes.get(key)
    }

    /// Shapes registered against `axis`, in registration order.
    pub fn for_axis(&self, axis: AxisId) -> impl Iterator<Item = (&str, &LabelShape)> {
        self.shapes.iter().filter(move |(_, s)| s.axis == axis).map(|(k, s)| (k.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
