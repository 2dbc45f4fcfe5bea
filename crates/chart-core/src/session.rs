// File: crates/chart-core/src/session.rs
// Summary: Chart session: the shared canvas, scale, visibility set, selection table and frame queue
// that every series control of one chart reads and writes.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::config::ChartConfig;
use crate::error::Result;
use crate::geometry::Translate;
use crate::interaction::{PointId, Selection, SelectionTable};
use crate::legend::{LabelShapes, Legend};
use crate::scale::ChartScale;
use crate::scene::{EventKind, NodeId, Scene};
use crate::scheduler::FrameScheduler;
use crate::types::{CLASS_CANVAS, CLASS_LEGEND, HASHED_PATTERN_ID};

/// Keys of the series currently visible. Insertion ordered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShownTargets {
    keys: IndexSet<String>,
}

impl ShownTargets {
    /// Mark `key` visible. Returns `false` when it already was.
    pub fn register(&mut self, key: &str) -> bool {
        self.keys.insert(key.to_string())
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.keys.shift_remove(key)
    }

    /// Flip membership of `key`; returns whether it is visible afterwards.
    pub fn toggle_visibility(&mut self, key: &str) -> bool {
        if self.remove(key) {
            false
        } else {
            self.register(key)
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

/// Mutable state shared by all controls of one chart.
pub struct SessionState {
    pub config: ChartConfig,
    pub scale: ChartScale,
    pub scene: Scene,
    /// Group that holds every series container and region group.
    pub canvas: NodeId,
    /// Shared `<defs>` for the clip path and fill patterns.
    pub defs: NodeId,
    pub shown: ShownTargets,
    pub selection: SelectionTable,
    pub legend: Legend,
    pub labels: LabelShapes,
    pub scheduler: FrameScheduler<SessionState>,
    /// Keys loaded into this chart; keys must be unique.
    pub loaded: IndexSet<String>,
    /// Timeline tracks, top to bottom.
    pub tracks: IndexSet<String>,
    /// Selected point that currently dims every other mark.
    pub blur_focus: Option<PointId>,
}

impl SessionState {
    /// Plot origin inside the canvas.
    pub fn origin(&self) -> Translate {
        Translate::new(self.config.padding.left, self.config.padding.top)
    }

    /// Return the shared hatch pattern id, creating the pattern on first use.
    pub fn ensure_hashed_pattern(&mut self) -> &'static str {
        if self.scene.by_element_id(HASHED_PATTERN_ID).is_none() {
            let pattern = self.scene.append(self.defs, "pattern");
            self.scene.set_attr(pattern, "id", HASHED_PATTERN_ID);
            self.scene.set_attr(pattern, "patternUnits", "userSpaceOnUse");
            self.scene.set_attr(pattern, "width", 4);
            self.scene.set_attr(pattern, "height", 4);
            let line = self.scene.append(pattern, "path");
            self.scene.set_attr(line, "d", "M-1,1 l2,-2 M0,4 l4,-4 M3,5 l2,-2");
            self.scene.set_attr(line, "stroke", "currentColor");
            self.scene.set_attr(line, "stroke-width", 1);
            trace!("created hashed fill pattern");
        }
        HASHED_PATTERN_ID
    }

    fn sync_canvas_size(&mut self) {
        let root = self.scene.root();
        let (w, h) = self.config.plot_size();
        self.scene.set_attr(root, "width", self.config.dimension.width);
        self.scene.set_attr(root, "height", self.config.dimension.height);
        let clip_rect = self
            .scene
            .by_element_id(&self.config.clip_path_id)
            .and_then(|clip| self.scene.children(clip).first().copied());
        if let Some(rect) = clip_rect {
            self.scene.set_attr(rect, "width", w);
            self.scene.set_attr(rect, "height", h);
        }
    }
}

/// Handle to one chart's shared state. Cheap to clone; single-threaded.
#[derive(Clone)]
pub struct ChartSession {
    state: Rc<RefCell<SessionState>>,
}

impl ChartSession {
    pub fn new(config: ChartConfig) -> Result<Self> {
        config.validate()?;
        let (w, h) = config.plot_size();
        let scale = ChartScale::from_axes(&config.axis, w, h)?;

        let mut scene = Scene::new();
        let root = scene.root();
        let defs = scene.append(root, "defs");
        let clip = scene.append(defs, "clipPath");
        scene.set_attr(clip, "id", &config.clip_path_id);
        scene.append(clip, "rect");
        let canvas = scene.append(root, "g");
        scene.add_class(canvas, CLASS_CANVAS);
        let legend_group = scene.append(root, "g");
        scene.add_class(legend_group, CLASS_LEGEND);
        scene.set_attr(legend_group, "role", "list");

        let mut state = SessionState {
            config,
            scale,
            scene,
            canvas,
            defs,
            shown: ShownTargets::default(),
            selection: SelectionTable::default(),
            legend: Legend::new(legend_group),
            labels: LabelShapes::default(),
            scheduler: FrameScheduler::new(),
            loaded: IndexSet::new(),
            tracks: IndexSet::new(),
            blur_focus: None,
        };
        state.sync_canvas_size();
        Ok(Self { state: Rc::new(RefCell::new(state)) })
    }

    pub fn state(&self) -> Ref<'_, SessionState> {
        self.state.borrow()
    }

    pub fn state_mut(&self) -> RefMut<'_, SessionState> {
        self.state.borrow_mut()
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<SessionState>> {
        Rc::downgrade(&self.state)
    }

    /// Change the canvas size and rebuild scales. Controls still need their
    /// own `resize` to move existing marks.
    pub fn set_size(&self, width: f64, height: f64) -> Result<()> {
        let mut st = self.state.borrow_mut();
        st.config.dimension.width = width.max(0.0);
        st.config.dimension.height = height.max(0.0);
        let (w, h) = st.config.plot_size();
        st.scale = ChartScale::from_axes(&st.config.axis, w, h)?;
        st.sync_canvas_size();
        debug!(width, height, "canvas resized");
        Ok(())
    }

    /// Simulate a frame tick: run after-paint tasks in order, then settle
    /// transitions. Returns the number of tasks run.
    pub fn run_frame(&self) -> usize {
        let tasks = self.state.borrow_mut().scheduler.drain();
        let count = tasks.len();
        for (name, task) in tasks {
            trace!(task = name, "running after-paint task");
            let mut st = self.state.borrow_mut();
            task(&mut *st);
        }
        self.state.borrow_mut().scene.complete_transitions();
        count
    }

    /// Fire `kind` on `node`. Returns `false` when nothing listens.
    ///
    /// The listener runs with no session borrow held, so consumer callbacks
    /// may freely call back into the session.
    pub fn dispatch(&self, node: NodeId, kind: EventKind) -> bool {
        let listener = self.state.borrow().scene.listener(node, kind);
        match listener {
            Some(l) => {
                l(node);
                true
            }
            None => false,
        }
    }

    pub fn click(&self, node: NodeId) -> bool {
        self.dispatch(node, EventKind::Click)
    }

    pub fn legend_click(&self, key: &str) -> bool {
        self.legend_event(key, EventKind::Click)
    }

    pub fn legend_hover(&self, key: &str) -> bool {
        self.legend_event(key, EventKind::MouseEnter)
    }

    pub fn legend_leave(&self, key: &str) -> bool {
        self.legend_event(key, EventKind::MouseLeave)
    }

    fn legend_event(&self, key: &str, kind: EventKind) -> bool {
        let node = self.state.borrow().legend.item(key);
        node.is_some_and(|n| self.dispatch(n, kind))
    }

    pub fn is_shown(&self, key: &str) -> bool {
        self.state.borrow().shown.contains(key)
    }

    pub fn shown_targets(&self) -> Vec<String> {
        self.state.borrow().shown.iter().map(str::to_string).collect()
    }

    pub fn selection(&self, key: &str, index: usize) -> Selection {
        self.state.borrow().selection.get(&PointId::new(key, index))
    }

    pub fn to_svg(&self) -> String {
        self.state.borrow().scene.to_svg()
    }
}
