//! The gesture state machine: raw pointer, wheel and key events in,
//! gateway mutations and presence updates out.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::config::BoardConfig;
use crate::gateway::{MutationError, MutationGateway};
use crate::geometry::{self, Frame, HandleKind};
use crate::presence::to_presence;
use crate::room::{History, Identity, PresenceChannel};
use crate::shapes::{note, Color, Pencil, Shape, ShapeId, ShapePatch};
use crate::stroke;

/// The active tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Select,
    Rectangle,
    Circle,
    Pencil,
    Text,
    Note,
    Image,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// The one active gesture. Created on pointer-down, destroyed on
/// pointer-up or pointer-leave; there is never more than one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    Panning,
    Drawing {
        id: ShapeId,
    },
    Dragging {
        id: ShapeId,
        grab_offset: Vec2,
    },
    Resizing {
        id: ShapeId,
        handle: HandleKind,
        anchor: Frame,
        anchor_pointer: Point,
    },
}

impl GestureState {
    /// Gestures that mutate shapes bracket the external history so the
    /// whole pointer-down-to-pointer-up run is one undo step.
    fn brackets_history(&self) -> bool {
        matches!(
            self,
            GestureState::Drawing { .. }
                | GestureState::Dragging { .. }
                | GestureState::Resizing { .. }
        )
    }
}

/// Requests surfaced to the host layer, drained with
/// [`CanvasController::take_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Show the user a notice (a quota rejection).
    Notice { message: String },
    /// Open the host's file picker; the chosen image comes back through
    /// [`CanvasController::place_image`].
    PickImage,
}

/// Drives the board from raw input events.
///
/// Owns the camera, tool and selection state plus the ports onto the
/// room's history and presence channels; all shape mutations go through
/// the gateway.
pub struct CanvasController {
    gateway: MutationGateway,
    history: Box<dyn History>,
    presence: Box<dyn PresenceChannel>,
    identity: Box<dyn Identity>,
    config: BoardConfig,
    pub camera: Camera,
    tool: Tool,
    stroke_color: Color,
    selection: Option<ShapeId>,
    gesture: GestureState,
    pointer_screen: Point,
    space_held: bool,
    text_editing: bool,
    events: Vec<HostEvent>,
}

impl CanvasController {
    pub fn new(
        gateway: MutationGateway,
        history: Box<dyn History>,
        presence: Box<dyn PresenceChannel>,
        identity: Box<dyn Identity>,
    ) -> Self {
        let config = gateway.config().clone();
        Self {
            gateway,
            history,
            presence,
            identity,
            config,
            camera: Camera::new(),
            tool: Tool::default(),
            stroke_color: Color::WHITE,
            selection: None,
            gesture: GestureState::Idle,
            pointer_screen: Point::ZERO,
            space_held: false,
            text_editing: false,
            events: Vec::new(),
        }
    }

    // --- Read model for the host/renderer ---

    /// Current board snapshot, in paint order.
    pub fn shapes(&self) -> Vec<Shape> {
        self.gateway.shapes()
    }

    /// Current chat log.
    pub fn chat_log(&self) -> Vec<crate::chat::ChatEntry> {
        self.gateway.chat_log()
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn selection(&self) -> Option<ShapeId> {
        self.selection
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    /// Other participants, as last observed on the presence channel.
    pub fn others(&self) -> Vec<crate::presence::RemotePeer> {
        self.presence.others()
    }

    /// Drain pending host requests.
    pub fn take_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    /// While a text-edit modal is focused the keyboard belongs to it;
    /// hotkeys and delete are suppressed.
    pub fn set_text_editing(&mut self, editing: bool) {
        self.text_editing = editing;
    }

    // --- Pointer events ---

    pub fn pointer_down(&mut self, screen: Point, button: MouseButton) {
        self.pointer_screen = screen;
        let world = self.camera.screen_to_world(screen);

        if button == MouseButton::Middle || self.space_held {
            self.set_gesture(GestureState::Panning);
            return;
        }
        if button != MouseButton::Left {
            return;
        }

        match self.tool {
            Tool::Rectangle | Tool::Circle | Tool::Pencil => self.start_drawing(world),
            Tool::Text => {
                self.place(Shape::text(world, self.stroke_color, None));
                self.set_tool(Tool::Select);
            }
            Tool::Note => {
                self.place(Shape::note(world, note::DEFAULT_FILL));
                self.set_tool(Tool::Select);
            }
            Tool::Image => {
                self.events.push(HostEvent::PickImage);
            }
            Tool::Select => self.start_select_gesture(world),
        }
    }

    pub fn pointer_move(&mut self, screen: Point) {
        let delta = screen - self.pointer_screen;
        self.pointer_screen = screen;

        if self.gesture == GestureState::Panning {
            // Raw screen-space delta: panning speed is zoom-independent.
            self.camera.pan(delta);
            self.push_presence(Some(self.camera.screen_to_world(screen)));
            return;
        }

        let world = self.camera.screen_to_world(screen);
        self.push_presence(Some(world));

        match self.gesture {
            GestureState::Idle | GestureState::Panning => {}
            GestureState::Drawing { id } => self.continue_drawing(id, world),
            GestureState::Dragging { id, grab_offset } => {
                let target = world - grab_offset;
                self.apply_patch(id, ShapePatch::position(target.x, target.y));
            }
            GestureState::Resizing {
                id,
                handle,
                anchor,
                anchor_pointer,
            } => {
                let frame = geometry::apply_resize(
                    handle,
                    &anchor,
                    world - anchor_pointer,
                    self.config.min_shape_size,
                );
                self.apply_patch(id, ShapePatch::frame(frame));
            }
        }
    }

    pub fn pointer_up(&mut self, screen: Point) {
        self.pointer_screen = screen;
        self.finish_gesture();
    }

    /// The pointer left the canvas: treated exactly like pointer-up, plus
    /// the broadcast cursor goes away.
    pub fn pointer_leave(&mut self) {
        self.finish_gesture();
        self.push_presence(None);
    }

    pub fn wheel(&mut self, delta_y: f64) {
        self.camera.apply_wheel(delta_y, self.config.zoom_sensitivity);
    }

    // --- Keyboard (orthogonal to pointer state) ---

    pub fn key_down(&mut self, key: &str) {
        if self.text_editing {
            return;
        }
        match key {
            " " => self.space_held = true,
            "Delete" | "Backspace" => self.delete_selection(),
            "v" => self.set_tool(Tool::Select),
            "r" => self.set_tool(Tool::Rectangle),
            "c" => self.set_tool(Tool::Circle),
            "p" => self.set_tool(Tool::Pencil),
            "t" => self.set_tool(Tool::Text),
            "n" => self.set_tool(Tool::Note),
            "i" => self.set_tool(Tool::Image),
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if key == " " {
            self.space_held = false;
        }
    }

    // --- Actions ---

    /// Switch the active tool, dropping the current selection.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.selection = None;
    }

    /// Delete the selected shape, if any.
    pub fn delete_selection(&mut self) {
        if let Some(id) = self.selection.take() {
            self.gateway.delete(id);
        }
    }

    /// Remove every shape on the board.
    pub fn clear_board(&mut self) {
        self.gateway.clear();
        self.selection = None;
    }

    pub fn undo(&mut self) {
        self.history.undo();
    }

    pub fn redo(&mut self) {
        self.history.redo();
    }

    /// Append a chat message as the local user. Blank messages are
    /// dropped here and never reach the gateway.
    pub fn send_chat(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let user = self.identity.display_name();
        if let Err(err) = self.gateway.append_chat(&user, text) {
            log::debug!("chat message rejected: {err}");
        }
    }

    /// Insert an image the host picked and compressed. Returns whether it
    /// was accepted; an over-budget payload surfaces a notice.
    pub fn place_image(&mut self, frame: Frame, content: String) -> bool {
        match self.gateway.insert(Shape::image(frame, content)) {
            Ok(()) => true,
            Err(err) => {
                self.report(err);
                false
            }
        }
    }

    // --- Gesture internals ---

    fn start_drawing(&mut self, world: Point) {
        let shape = match self.tool {
            Tool::Rectangle => Shape::rectangle(world, self.stroke_color, Color::TRANSPARENT),
            Tool::Circle => Shape::circle(world, self.stroke_color, Color::TRANSPARENT),
            Tool::Pencil => Shape::pencil(world, self.stroke_color),
            _ => return,
        };
        let id = shape.id();
        match self.gateway.insert(shape) {
            Ok(()) => self.set_gesture(GestureState::Drawing { id }),
            // Quota hit before anything was drawn; stay Idle.
            Err(err) => self.report(err),
        }
    }

    fn start_select_gesture(&mut self, world: Point) {
        // Resize handles of the selected shape win over shape bodies.
        if let Some(id) = self.selection {
            if let Some(shape) = self.find_shape(id) {
                let frame = shape.frame().normalized();
                let tolerance = self.config.handle_hit_size / self.camera.zoom;
                if let Some(handle) = geometry::handle_at(&frame, world, tolerance) {
                    self.set_gesture(GestureState::Resizing {
                        id,
                        handle,
                        anchor: frame,
                        anchor_pointer: world,
                    });
                    return;
                }
            }
        }

        let shapes = self.gateway.shapes();
        match geometry::hit_test(world, &shapes) {
            Some(id) => {
                let Some(shape) = shapes.iter().find(|s| s.id() == id) else {
                    return;
                };
                let origin = shape.frame().normalized().origin();
                self.selection = Some(id);
                self.push_presence(Some(world));
                self.set_gesture(GestureState::Dragging {
                    id,
                    grab_offset: world - origin,
                });
            }
            None => {
                self.selection = None;
                self.push_presence(Some(world));
                self.set_gesture(GestureState::Panning);
            }
        }
    }

    fn continue_drawing(&mut self, id: ShapeId, world: Point) {
        // The shape may have been deleted by another participant; growing
        // nothing is fine, the gesture just idles along.
        let Some(shape) = self.find_shape(id) else {
            return;
        };
        match shape {
            Shape::Pencil(pencil) => {
                let Some(offset) = stroke::capture(
                    &pencil.points,
                    pencil.frame.origin(),
                    world,
                    self.config.capture_distance,
                    self.config.max_stroke_points,
                ) else {
                    return;
                };
                let mut points = pencil.points.clone();
                points.push(offset);
                self.apply_patch(id, stroke_patch(points));
            }
            other => {
                let origin = other.frame().origin();
                self.apply_patch(id, ShapePatch::size(world.x - origin.x, world.y - origin.y));
            }
        }
    }

    fn finish_gesture(&mut self) {
        if let GestureState::Drawing { id } = self.gesture {
            self.finish_stroke(id);
        }
        self.set_gesture(GestureState::Idle);
    }

    /// Run the one-pass simplification over a finished pencil stroke.
    fn finish_stroke(&mut self, id: ShapeId) {
        let Some(Shape::Pencil(pencil)) = self.find_shape(id) else {
            return;
        };
        if pencil.points.len() <= self.config.simplify_threshold {
            return;
        }
        let points = stroke::simplify(&pencil.points, self.config.simplify_epsilon);
        log::trace!("stroke {id}: {} -> {} points", pencil.points.len(), points.len());
        self.apply_patch(id, stroke_patch(points));
    }

    /// Transition gestures, bracketing the external history on the way
    /// into and out of the mutating states.
    fn set_gesture(&mut self, next: GestureState) {
        let was = self.gesture.brackets_history();
        let will = next.brackets_history();
        if !was && will {
            self.history.pause();
        }
        if was && !will {
            self.history.resume();
        }
        self.gesture = next;
    }

    /// Issue an update; `NotFound` is expected under concurrent editing,
    /// a quota rejection aborts the gesture with a notice.
    fn apply_patch(&mut self, id: ShapeId, patch: ShapePatch) {
        match self.gateway.update(id, &patch) {
            Ok(_) => {}
            Err(err) => {
                self.report(err);
                self.set_gesture(GestureState::Idle);
            }
        }
    }

    fn find_shape(&self, id: ShapeId) -> Option<Shape> {
        self.gateway.shapes().into_iter().find(|s| s.id() == id)
    }

    fn place(&mut self, shape: Shape) {
        if let Err(err) = self.gateway.insert(shape) {
            self.report(err);
        }
    }

    fn report(&mut self, err: MutationError) {
        if err.is_quota() {
            log::warn!("mutation rejected: {err}");
            self.events.push(HostEvent::Notice {
                message: err.to_string(),
            });
        } else {
            log::debug!("mutation rejected: {err}");
        }
    }

    fn push_presence(&mut self, cursor: Option<Point>) {
        let selection: Vec<ShapeId> = self.selection.into_iter().collect();
        self.presence.set_local_presence(to_presence(cursor, &selection));
    }
}

/// Patch carrying a stroke's points together with its refreshed coarse
/// extent, so the frame stays usable for hit testing mid-stroke.
fn stroke_patch(points: Vec<Vec2>) -> ShapePatch {
    let (width, height) = Pencil::extent(&points);
    ShapePatch {
        width: Some(width),
        height: Some(height),
        points: Some(points),
        ..ShapePatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatEntry;
    use crate::room::{LocalIdentity, MemoryHistory, MemoryList, MemoryPresence, SharedList};

    struct Fixture {
        controller: CanvasController,
        board: MemoryList<Shape>,
        history: MemoryHistory,
        presence: MemoryPresence,
    }

    fn fixture() -> Fixture {
        fixture_with(BoardConfig::default())
    }

    fn fixture_with(config: BoardConfig) -> Fixture {
        let board: MemoryList<Shape> = MemoryList::new();
        let chat: MemoryList<ChatEntry> = MemoryList::new();
        let history = MemoryHistory::new();
        let presence = MemoryPresence::new();
        let gateway = MutationGateway::new(Box::new(board.clone()), Box::new(chat), config);
        let controller = CanvasController::new(
            gateway,
            Box::new(history.clone()),
            Box::new(presence.clone()),
            Box::new(LocalIdentity::new("ada")),
        );
        Fixture {
            controller,
            board,
            history,
            presence,
        }
    }

    #[test]
    fn test_draw_rectangle_gesture() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Rectangle);

        f.controller.pointer_down(Point::new(10.0, 10.0), MouseButton::Left);
        assert!(matches!(f.controller.gesture(), GestureState::Drawing { .. }));
        assert_eq!(f.board.len(), 1);
        assert_eq!(f.board.get_all()[0].frame(), &Frame::new(10.0, 10.0, 0.0, 0.0));

        f.controller.pointer_move(Point::new(60.0, 40.0));
        f.controller.pointer_move(Point::new(80.0, 70.0));
        f.controller.pointer_up(Point::new(80.0, 70.0));

        assert_eq!(f.controller.gesture(), GestureState::Idle);
        let frame = *f.board.get_all()[0].frame();
        assert_eq!(frame, Frame::new(10.0, 10.0, 70.0, 60.0));
    }

    #[test]
    fn test_draw_gesture_brackets_history_once() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Circle);

        f.controller.pointer_down(Point::new(0.0, 0.0), MouseButton::Left);
        for i in 1..50 {
            f.controller.pointer_move(Point::new(i as f64, i as f64));
        }
        f.controller.pointer_up(Point::new(50.0, 50.0));

        // One pause/resume pair regardless of how many moves happened.
        assert_eq!(f.history.pauses(), 1);
        assert_eq!(f.history.resumes(), 1);
        assert!(!f.history.is_paused());
    }

    #[test]
    fn test_pointer_leave_closes_bracket() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Rectangle);

        f.controller.pointer_down(Point::new(0.0, 0.0), MouseButton::Left);
        assert!(f.history.is_paused());

        f.controller.pointer_leave();
        assert_eq!(f.controller.gesture(), GestureState::Idle);
        assert!(!f.history.is_paused());
        assert_eq!(f.history.pauses(), f.history.resumes());
        // The broadcast cursor went away with the pointer.
        assert_eq!(f.presence.local().unwrap().cursor, None);
    }

    #[test]
    fn test_negative_drag_normalizes() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Rectangle);

        f.controller.pointer_down(Point::new(10.0, 10.0), MouseButton::Left);
        f.controller.pointer_move(Point::new(-10.0, 0.0));
        f.controller.pointer_up(Point::new(-10.0, 0.0));

        let frame = *f.board.get_all()[0].frame();
        assert_eq!(frame, Frame::new(10.0, 10.0, -20.0, -10.0));
        assert_eq!(frame.normalized(), Frame::new(-10.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn test_pencil_capture_filters_dense_moves() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Pencil);

        f.controller.pointer_down(Point::new(100.0, 100.0), MouseButton::Left);
        // One-unit steps: nothing captured until cumulative movement
        // exceeds the 8-unit threshold.
        for step in 1..=8 {
            f.controller.pointer_move(Point::new(100.0 + step as f64, 100.0));
        }
        let Shape::Pencil(pencil) = f.board.get_all()[0].clone() else {
            panic!("expected pencil");
        };
        assert_eq!(pencil.points.len(), 1);

        f.controller.pointer_move(Point::new(109.0, 100.0));
        let Shape::Pencil(pencil) = f.board.get_all()[0].clone() else {
            panic!("expected pencil");
        };
        assert_eq!(pencil.points.len(), 2);
        assert_eq!(pencil.points[0], Vec2::ZERO);

        f.controller.pointer_up(Point::new(109.0, 100.0));
        assert_eq!(f.controller.gesture(), GestureState::Idle);
    }

    #[test]
    fn test_pencil_simplifies_on_release() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Pencil);

        f.controller.pointer_down(Point::new(0.0, 0.0), MouseButton::Left);
        // 9-unit steps defeat the capture filter, producing 30 points.
        for step in 1..30 {
            f.controller.pointer_move(Point::new(step as f64 * 9.0, 0.0));
        }
        let Shape::Pencil(before) = f.board.get_all()[0].clone() else {
            panic!("expected pencil");
        };
        assert_eq!(before.points.len(), 30);
        let last = *before.points.last().unwrap();

        f.controller.pointer_up(Point::new(261.0, 0.0));
        let Shape::Pencil(after) = f.board.get_all()[0].clone() else {
            panic!("expected pencil");
        };
        // Simplification ran, endpoints intact. With 9-unit spacing and a
        // 4-unit epsilon every point survives the pass.
        assert_eq!(after.points.first().copied(), Some(Vec2::ZERO));
        assert_eq!(after.points.last().copied(), Some(last));
        assert!(after.points.len() <= before.points.len());
        // The frame tracked the stroke extent.
        assert!(after.frame.width > 0.0);
    }

    #[test]
    fn test_click_place_text_resets_tool() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Text);

        f.controller.pointer_down(Point::new(5.0, 6.0), MouseButton::Left);
        assert_eq!(f.controller.gesture(), GestureState::Idle);
        assert_eq!(f.controller.tool(), Tool::Select);

        let shapes = f.board.get_all();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].frame(), &Frame::new(5.0, 6.0, 150.0, 40.0));
        // Click placement is not a gesture; no history bracket opened.
        assert_eq!(f.history.pauses(), 0);
    }

    #[test]
    fn test_click_place_note_has_default_size() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Note);
        f.controller.pointer_down(Point::new(0.0, 0.0), MouseButton::Left);

        let shapes = f.board.get_all();
        assert_eq!(shapes[0].frame(), &Frame::new(0.0, 0.0, 200.0, 200.0));
        assert_eq!(f.controller.tool(), Tool::Select);
    }

    #[test]
    fn test_image_tool_requests_file_pick() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Image);
        f.controller.pointer_down(Point::new(0.0, 0.0), MouseButton::Left);

        assert_eq!(f.controller.gesture(), GestureState::Idle);
        assert!(f.board.is_empty());
        assert_eq!(f.controller.take_events(), vec![HostEvent::PickImage]);
    }

    #[test]
    fn test_select_and_drag() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Rectangle);
        f.controller.pointer_down(Point::new(10.0, 10.0), MouseButton::Left);
        f.controller.pointer_move(Point::new(60.0, 60.0));
        f.controller.pointer_up(Point::new(60.0, 60.0));
        let id = f.board.get_all()[0].id();

        f.controller.set_tool(Tool::Select);
        f.controller.pointer_down(Point::new(30.0, 30.0), MouseButton::Left);
        assert_eq!(f.controller.selection(), Some(id));
        assert!(matches!(f.controller.gesture(), GestureState::Dragging { .. }));

        // Grab offset keeps the shape from snapping to the cursor.
        f.controller.pointer_move(Point::new(40.0, 35.0));
        let frame = *f.board.get_all()[0].frame();
        assert_eq!(frame.origin(), Point::new(20.0, 15.0));

        f.controller.pointer_up(Point::new(40.0, 35.0));
        assert_eq!(f.history.pauses(), 2); // draw + drag
        assert_eq!(f.history.resumes(), 2);
    }

    #[test]
    fn test_select_empty_space_pans() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Select);

        f.controller.pointer_down(Point::new(100.0, 100.0), MouseButton::Left);
        assert_eq!(f.controller.gesture(), GestureState::Panning);
        assert_eq!(f.controller.selection(), None);

        f.controller.pointer_move(Point::new(110.0, 95.0));
        assert_eq!(f.controller.camera.offset, Vec2::new(10.0, -5.0));

        // Panning opens no history bracket.
        assert_eq!(f.history.pauses(), 0);
        f.controller.pointer_up(Point::new(110.0, 95.0));
    }

    #[test]
    fn test_pan_delta_is_screen_space() {
        let mut f = fixture();
        f.controller.camera.zoom = 2.0;
        f.controller.pointer_down(Point::new(0.0, 0.0), MouseButton::Middle);
        f.controller.pointer_move(Point::new(10.0, 0.0));
        // Raw delta, not divided by zoom.
        assert_eq!(f.controller.camera.offset, Vec2::new(10.0, 0.0));
        f.controller.pointer_up(Point::new(10.0, 0.0));
    }

    #[test]
    fn test_space_held_pans() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Rectangle);
        f.controller.key_down(" ");
        f.controller.pointer_down(Point::new(0.0, 0.0), MouseButton::Left);

        assert_eq!(f.controller.gesture(), GestureState::Panning);
        assert!(f.board.is_empty());

        f.controller.pointer_up(Point::new(0.0, 0.0));
        f.controller.key_up(" ");
        f.controller.pointer_down(Point::new(0.0, 0.0), MouseButton::Left);
        assert!(matches!(f.controller.gesture(), GestureState::Drawing { .. }));
    }

    #[test]
    fn test_resize_via_handle() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Rectangle);
        f.controller.pointer_down(Point::new(0.0, 0.0), MouseButton::Left);
        f.controller.pointer_move(Point::new(100.0, 50.0));
        f.controller.pointer_up(Point::new(100.0, 50.0));
        let id = f.board.get_all()[0].id();

        f.controller.set_tool(Tool::Select);
        f.controller.pointer_down(Point::new(50.0, 25.0), MouseButton::Left);
        f.controller.pointer_up(Point::new(50.0, 25.0));
        assert_eq!(f.controller.selection(), Some(id));

        // Grab the bottom-right handle (within its hit radius).
        f.controller.pointer_down(Point::new(98.0, 49.0), MouseButton::Left);
        assert!(matches!(
            f.controller.gesture(),
            GestureState::Resizing {
                handle: HandleKind::BottomRight,
                ..
            }
        ));

        f.controller.pointer_move(Point::new(123.0, 69.0));
        f.controller.pointer_up(Point::new(123.0, 69.0));

        let frame = *f.board.get_all()[0].frame();
        assert_eq!(frame, Frame::new(0.0, 0.0, 125.0, 70.0));
    }

    #[test]
    fn test_resize_clamp_preserves_far_edge() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Rectangle);
        f.controller.pointer_down(Point::new(0.0, 0.0), MouseButton::Left);
        f.controller.pointer_move(Point::new(100.0, 50.0));
        f.controller.pointer_up(Point::new(100.0, 50.0));

        f.controller.set_tool(Tool::Select);
        f.controller.pointer_down(Point::new(50.0, 25.0), MouseButton::Left);
        f.controller.pointer_up(Point::new(50.0, 25.0));

        // Drag the left edge past the right one.
        f.controller.pointer_down(Point::new(0.0, 25.0), MouseButton::Left);
        f.controller.pointer_move(Point::new(95.0, 25.0));
        f.controller.pointer_up(Point::new(95.0, 25.0));

        let frame = *f.board.get_all()[0].frame();
        assert_eq!(frame, Frame::new(90.0, 0.0, 10.0, 50.0));
    }

    #[test]
    fn test_quota_failure_on_draw_stays_idle() {
        let config = BoardConfig {
            max_shapes: 1,
            ..BoardConfig::default()
        };
        let mut f = fixture_with(config);
        f.controller.set_tool(Tool::Rectangle);

        f.controller.pointer_down(Point::new(0.0, 0.0), MouseButton::Left);
        f.controller.pointer_up(Point::new(0.0, 0.0));
        assert_eq!(f.board.len(), 1);

        f.controller.pointer_down(Point::new(50.0, 50.0), MouseButton::Left);
        assert_eq!(f.controller.gesture(), GestureState::Idle);
        assert_eq!(f.board.len(), 1);
        // The failed insert never opened a bracket.
        assert_eq!(f.history.pauses(), 1);

        let events = f.controller.take_events();
        assert!(matches!(events.as_slice(), [HostEvent::Notice { .. }]));
    }

    #[test]
    fn test_concurrent_delete_mid_drag_is_harmless() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Rectangle);
        f.controller.pointer_down(Point::new(0.0, 0.0), MouseButton::Left);
        f.controller.pointer_move(Point::new(50.0, 50.0));
        f.controller.pointer_up(Point::new(50.0, 50.0));

        f.controller.set_tool(Tool::Select);
        f.controller.pointer_down(Point::new(25.0, 25.0), MouseButton::Left);
        assert!(matches!(f.controller.gesture(), GestureState::Dragging { .. }));

        // Another participant deletes the shape under our pointer.
        f.board.delete_at(0);

        f.controller.pointer_move(Point::new(60.0, 60.0));
        f.controller.pointer_up(Point::new(60.0, 60.0));

        assert!(f.board.is_empty());
        assert_eq!(f.controller.gesture(), GestureState::Idle);
        assert!(!f.history.is_paused());
        // Not-found is silent: no user-visible notice.
        assert!(f.controller.take_events().is_empty());
    }

    #[test]
    fn test_delete_key_removes_selection() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Rectangle);
        f.controller.pointer_down(Point::new(0.0, 0.0), MouseButton::Left);
        f.controller.pointer_move(Point::new(50.0, 50.0));
        f.controller.pointer_up(Point::new(50.0, 50.0));

        f.controller.set_tool(Tool::Select);
        f.controller.pointer_down(Point::new(25.0, 25.0), MouseButton::Left);
        f.controller.pointer_up(Point::new(25.0, 25.0));
        assert!(f.controller.selection().is_some());

        f.controller.key_down("Delete");
        assert!(f.board.is_empty());
        assert_eq!(f.controller.selection(), None);
    }

    #[test]
    fn test_hotkeys_switch_tool_and_clear_selection() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Rectangle);
        f.controller.pointer_down(Point::new(0.0, 0.0), MouseButton::Left);
        f.controller.pointer_move(Point::new(50.0, 50.0));
        f.controller.pointer_up(Point::new(50.0, 50.0));

        f.controller.set_tool(Tool::Select);
        f.controller.pointer_down(Point::new(25.0, 25.0), MouseButton::Left);
        f.controller.pointer_up(Point::new(25.0, 25.0));
        assert!(f.controller.selection().is_some());

        f.controller.key_down("r");
        assert_eq!(f.controller.tool(), Tool::Rectangle);
        assert_eq!(f.controller.selection(), None);
    }

    #[test]
    fn test_keyboard_suppressed_while_editing_text() {
        let mut f = fixture();
        f.controller.set_text_editing(true);
        f.controller.key_down("r");
        assert_eq!(f.controller.tool(), Tool::Select);

        f.controller.set_text_editing(false);
        f.controller.key_down("r");
        assert_eq!(f.controller.tool(), Tool::Rectangle);
    }

    #[test]
    fn test_presence_carries_world_coordinates() {
        let mut f = fixture();
        f.controller.camera.offset = Vec2::new(100.0, 0.0);
        f.controller.camera.zoom = 2.0;

        f.controller.pointer_move(Point::new(300.0, 50.0));
        let presence = f.presence.local().unwrap();
        assert_eq!(presence.cursor, Some(Point::new(100.0, 25.0)));
    }

    #[test]
    fn test_wheel_zooms_with_configured_sensitivity() {
        let mut f = fixture();
        f.controller.wheel(-100.0);
        assert!((f.controller.camera.zoom - 1.1).abs() < 1e-12);
        assert_eq!(f.controller.camera.offset, Vec2::ZERO);
    }

    #[test]
    fn test_send_chat_uses_identity() {
        let mut f = fixture();
        f.controller.send_chat("  hello  ");
        f.controller.send_chat("   ");

        let log = f.controller.chat_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].user, "ada");
        assert_eq!(log[0].text, "hello");
    }

    #[test]
    fn test_place_image_respects_budget() {
        let config = BoardConfig {
            image_budget: 8,
            ..BoardConfig::default()
        };
        let mut f = fixture_with(config);

        let accepted = f
            .controller
            .place_image(Frame::new(0.0, 0.0, 32.0, 32.0), "data:,x".to_string());
        assert!(accepted);

        let rejected = f
            .controller
            .place_image(Frame::new(0.0, 0.0, 32.0, 32.0), "data:,0123456789".to_string());
        assert!(!rejected);
        assert_eq!(f.board.len(), 1);
        assert!(matches!(
            f.controller.take_events().as_slice(),
            [HostEvent::Notice { .. }]
        ));
    }

    #[test]
    fn test_clear_board_empties_collection() {
        let mut f = fixture();
        f.controller.set_tool(Tool::Rectangle);
        for i in 0..3 {
            let p = Point::new(i as f64 * 100.0, 0.0);
            f.controller.pointer_down(p, MouseButton::Left);
            f.controller.pointer_up(p);
        }
        assert_eq!(f.board.len(), 3);

        f.controller.clear_board();
        assert!(f.board.is_empty());
    }

    #[test]
    fn test_undo_redo_pass_through() {
        let mut f = fixture();
        f.controller.undo();
        f.controller.redo();
        f.controller.redo();
        assert_eq!(f.history.undos(), 1);
        assert_eq!(f.history.redos(), 2);
    }
}
