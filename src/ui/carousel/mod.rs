//! Rotating item carousel.
//!
//! With two or more items the carousel keeps three rendered slots (previous
//! at -100%, current at 0%, next at +100%), shows left/right affordances and a
//! position indicator, and advances automatically. A transition holds the
//! carousel for a settle window; navigation during the hold is ignored.
//!
//! With zero or one item the carousel is idle: the single item (if any) is
//! rendered statically and no controls or timers exist.

mod intent;
mod item;
mod reducer;
mod slots;
mod state;

use std::time::Duration;

use crate::dom::{Document, Event, EventKind, NodeId};
use crate::timer::Timer;
use crate::ui::mvi::Reducer;
use crate::view::{dispatch, Handler, HandlerTable, Renderer, View, ViewError, Widget};

pub use intent::RotationIntent;
pub use item::{CarouselItem, ItemRenderer};
pub use reducer::RotationReducer;
pub use slots::{Offset, SlotRing};
pub use state::RotationState;

/// Delay before the carousel advances on its own.
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(8000);

/// How long navigation stays locked after a transition.
pub const SETTLE_WINDOW: Duration = Duration::from_millis(700);

/// Custom event that moves the carousel forward when fired on its container.
pub const ADVANCE_EVENT: &str = "advance";

pub const LEFT_ARROW_CLASS: &str = "carousel-arrow-left";
pub const RIGHT_ARROW_CLASS: &str = "carousel-arrow-right";
pub const INDICATOR_CLASS: &str = "carousel-position-indicator";
pub const MARKER_CLASS: &str = "carousel-marker";
pub const FILLED_CLASS: &str = "filled";

/// Timer tokens a carousel schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarouselTimer {
    AutoAdvance,
    ReleaseHold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselTiming {
    pub advance_delay: Duration,
    pub settle_window: Duration,
}

impl Default for CarouselTiming {
    fn default() -> Self {
        Self {
            advance_delay: AUTO_ADVANCE_DELAY,
            settle_window: SETTLE_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Navigation affordances and indicator nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub left: NodeId,
    pub right: NodeId,
    pub indicator: NodeId,
    /// One marker per item, in item order.
    pub markers: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slots {
    Empty,
    Single(NodeId),
    Ring(SlotRing),
}

pub struct Carousel<M, R, T> {
    view: View<R, Self>,
    items: Vec<M>,
    rotation: RotationState,
    slots: Slots,
    controls: Option<Controls>,
    timer: T,
    timing: CarouselTiming,
}

impl<M, R, T> Widget for Carousel<M, R, T> {
    type Renderer = R;

    fn view(&self) -> &View<R, Self> {
        &self.view
    }
}

impl<M, R, T> Carousel<M, R, T>
where
    R: Renderer<M>,
    T: Timer<CarouselTimer>,
{
    pub fn new(
        document: Document,
        root_id: &str,
        renderer: R,
        items: Vec<M>,
        timer: T,
    ) -> Result<Self, ViewError> {
        Self::with_timing(document, root_id, renderer, items, timer, CarouselTiming::default())
    }

    pub fn with_timing(
        document: Document,
        root_id: &str,
        renderer: R,
        items: Vec<M>,
        timer: T,
        timing: CarouselTiming,
    ) -> Result<Self, ViewError> {
        // Item templates may also use on-click="next" / on-click="previous".
        let handlers = HandlerTable::new()
            .on("next", Self::handle_next as Handler<Self>)
            .on("previous", Self::handle_previous);
        let view = View::attach(document, root_id, renderer, handlers)?;

        let mut carousel = Self {
            view,
            rotation: RotationState::for_len(items.len()),
            items,
            slots: Slots::Empty,
            controls: None,
            timer,
            timing,
        };
        carousel.start()?;
        Ok(carousel)
    }

    fn start(&mut self) -> Result<(), ViewError> {
        let Some(first) = self.items.first() else {
            tracing::debug!("Carousel has no items; nothing to render");
            return Ok(());
        };

        let current = self.view.render_node(first)?;
        self.place(current, Offset::Current);

        if !self.rotation.is_rotating() {
            self.slots = Slots::Single(current);
            tracing::debug!("Carousel idle with a single item");
            return Ok(());
        }

        let len = self.items.len();
        self.add_controls(len);

        let next = self.view.render_node(&self.items[1])?;
        self.place(next, Offset::Next);
        let previous = self.view.render_node(&self.items[len - 1])?;
        self.place(previous, Offset::Previous);
        self.slots = Slots::Ring(SlotRing::new(previous, current, next));

        let root = self.view.root();
        self.view.add_listener(
            root,
            EventKind::Custom(ADVANCE_EVENT.to_string()),
            Self::handle_next,
            root,
        );

        self.timer.schedule(self.timing.advance_delay, CarouselTimer::AutoAdvance);
        tracing::debug!(items = len, "Carousel rotating");
        Ok(())
    }

    /// Appends a rendered slot at `offset` and binds its events.
    fn place(&mut self, node: NodeId, offset: Offset) {
        self.view.document_mut().set_style(node, "left", offset.css());
        self.view.append_item(node);
    }

    fn add_controls(&mut self, len: usize) {
        let root = self.view.root();
        let document = self.view.document_mut();

        let left = document.create_element("i");
        document.set_attribute(left, "class", LEFT_ARROW_CLASS);
        let right = document.create_element("i");
        document.set_attribute(right, "class", RIGHT_ARROW_CLASS);

        let indicator = document.create_element("div");
        document.set_attribute(indicator, "class", INDICATOR_CLASS);
        let markers: Vec<NodeId> = (0..len)
            .map(|position| {
                let marker = document.create_element("i");
                document.set_attribute(marker, "class", MARKER_CLASS);
                if position == 0 {
                    document.add_class(marker, FILLED_CLASS);
                }
                document.append_child(indicator, marker);
                marker
            })
            .collect();

        document.append_child(root, left);
        document.append_child(root, right);
        document.append_child(root, indicator);

        self.view
            .add_listener(left, EventKind::MouseDown, Self::handle_previous, left);
        self.view
            .add_listener(right, EventKind::MouseDown, Self::handle_next, right);

        self.controls = Some(Controls {
            left,
            right,
            indicator,
            markers,
        });
    }

    fn handle_next(carousel: &mut Self, _event: &Event, _item: NodeId) -> Result<(), ViewError> {
        carousel.show_next().map(|_| ())
    }

    fn handle_previous(carousel: &mut Self, _event: &Event, _item: NodeId) -> Result<(), ViewError> {
        carousel.show_previous().map(|_| ())
    }

    /// Moves forward one item. Returns `false` when the move was ignored
    /// (idle carousel or settle window still running).
    pub fn show_next(&mut self) -> Result<bool, ViewError> {
        self.transition(Direction::Forward)
    }

    /// Moves back one item. Returns `false` when the move was ignored.
    pub fn show_previous(&mut self) -> Result<bool, ViewError> {
        self.transition(Direction::Backward)
    }

    fn transition(&mut self, direction: Direction) -> Result<bool, ViewError> {
        self.timer.cancel(&CarouselTimer::AutoAdvance);

        let intent = match direction {
            Direction::Forward => RotationIntent::Next,
            Direction::Backward => RotationIntent::Previous,
        };
        let old_index = self.rotation.index();
        let next_state = RotationReducer::reduce(self.rotation.clone(), intent);
        let Slots::Ring(mut ring) = self.slots else {
            return Ok(false);
        };
        if next_state == self.rotation {
            tracing::debug!(?direction, "Carousel held; transition ignored");
            return Ok(false);
        }

        let new_index = next_state.index();
        let len = self.items.len();
        let look_ahead = match direction {
            Direction::Forward => (new_index + 1) % len,
            Direction::Backward => (new_index + len - 1) % len,
        };
        // Render before touching the tree so a failing template changes nothing.
        let entering = self.view.render_node(&self.items[look_ahead])?;

        self.rotation = next_state;
        self.timer
            .schedule(self.timing.settle_window, CarouselTimer::ReleaseHold);

        let document = self.view.document_mut();
        match direction {
            Direction::Forward => {
                document.set_style(ring.current(), "left", Offset::Previous.css());
                document.set_style(ring.next(), "left", Offset::Current.css());
            }
            Direction::Backward => {
                document.set_style(ring.current(), "left", Offset::Next.css());
                document.set_style(ring.previous(), "left", Offset::Current.css());
            }
        }

        if let Some(controls) = &self.controls {
            document.remove_class(controls.markers[old_index], FILLED_CLASS);
            document.add_class(controls.markers[new_index], FILLED_CLASS);
        }

        let (leaving, offset) = match direction {
            Direction::Forward => (ring.rotate_forward(entering), Offset::Next),
            Direction::Backward => (ring.rotate_backward(entering), Offset::Previous),
        };
        self.view.remove_node(leaving);
        self.place(entering, offset);
        self.slots = Slots::Ring(ring);

        self.timer
            .schedule(self.timing.advance_delay, CarouselTimer::AutoAdvance);
        tracing::debug!(?direction, from = old_index, to = new_index, "Carousel transition");
        Ok(true)
    }

    /// Handles a fired timer token.
    ///
    /// Auto-advance is delivered as an `advance` event on the container so it
    /// follows the same path as any other advance signal.
    pub fn on_timer(&mut self, token: CarouselTimer) -> Result<(), ViewError> {
        match token {
            CarouselTimer::AutoAdvance => {
                let event = Event::custom(ADVANCE_EVENT, self.view.root());
                dispatch(self, &event)?;
            }
            CarouselTimer::ReleaseHold => {
                self.rotation = RotationReducer::reduce(self.rotation.clone(), RotationIntent::ReleaseHold);
            }
        }
        Ok(())
    }

    /// Delivers a node event (e.g. `mousedown` on an affordance).
    pub fn handle_event(&mut self, event: &Event) -> Result<usize, ViewError> {
        dispatch(self, event)
    }
}

impl<M, R, T> Carousel<M, R, T> {
    pub fn index(&self) -> usize {
        self.rotation.index()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[M] {
        &self.items
    }

    pub fn current_item(&self) -> Option<&M> {
        self.items.get(self.index())
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn is_rotating(&self) -> bool {
        self.rotation.is_rotating()
    }

    pub fn is_held(&self) -> bool {
        self.rotation.is_held()
    }

    pub fn current_node(&self) -> Option<NodeId> {
        match self.slots {
            Slots::Empty => None,
            Slots::Single(node) => Some(node),
            Slots::Ring(ring) => Some(ring.current()),
        }
    }

    pub fn previous_node(&self) -> Option<NodeId> {
        match self.slots {
            Slots::Ring(ring) => Some(ring.previous()),
            _ => None,
        }
    }

    pub fn next_node(&self) -> Option<NodeId> {
        match self.slots {
            Slots::Ring(ring) => Some(ring.next()),
            _ => None,
        }
    }

    pub fn controls(&self) -> Option<&Controls> {
        self.controls.as_ref()
    }

    pub fn document(&self) -> &Document {
        self.view.document()
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn timing(&self) -> CarouselTiming {
        self.timing
    }
}
