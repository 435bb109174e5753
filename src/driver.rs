//! Serial event loop between the host and the simulation
//!
//! The host pushes frame deltas, drops and menu commands into one queue; the
//! driver drains it in order. A drop is resolved against the state left by
//! every earlier event and fully applied before the next tick runs.

use crate::app::{App, MenuAction};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameEvent, SessionSnapshot, TickInput, tick};

/// Host → game events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// Render loop elapsed `dt` seconds
    Frame { dt: f32 },
    /// Player tapped to drop the block
    Place,
    /// UI navigation or preference change
    Menu(MenuAction),
}

/// FIFO of pending host events
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<SessionEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

/// Fixed timestep accumulator
#[derive(Debug, Clone, Copy)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time; returns how many fixed steps to run (at most `MAX_SUBSTEPS`)
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        // Long stalls (tab switch, debugger) drop time instead of catching up
        self.accumulator = (self.accumulator + frame_dt).min(self.dt * MAX_SUBSTEPS as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0)
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Owns the app and feeds it events one at a time
pub struct Driver {
    pub app: App,
    queue: EventQueue,
    timestep: FixedTimestep,
    /// Demo AI plays instead of the player
    pub idle_mode: bool,
}

impl Driver {
    pub fn new(app: App) -> Self {
        Self {
            app,
            queue: EventQueue::new(),
            timestep: FixedTimestep::new(SIM_DT),
            idle_mode: false,
        }
    }

    pub fn push(&mut self, event: SessionEvent) {
        self.queue.push(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Process every queued event in arrival order
    ///
    /// Returns the gameplay events produced, in order.
    pub fn run_pending(&mut self) -> Vec<GameEvent> {
        let mut out = Vec::new();
        for event in self.queue.drain() {
            match event {
                SessionEvent::Frame { dt } => self.run_frame(dt, &mut out),
                SessionEvent::Place => {
                    if self.app.is_playing() {
                        if let Some(e) = self.app.session.place() {
                            self.emit(e, &mut out);
                        }
                    }
                }
                SessionEvent::Menu(action) => {
                    if self.app.handle(action) {
                        self.timestep.reset();
                    }
                }
            }
        }
        out
    }

    fn run_frame(&mut self, dt: f32, out: &mut Vec<GameEvent>) {
        let steps = self.timestep.accumulate(dt);
        let input = TickInput {
            place: false,
            idle_mode: self.idle_mode,
        };
        for _ in 0..steps {
            if !self.app.is_playing() {
                break;
            }
            if let Some(e) = tick(&mut self.app.session, &input, self.timestep.dt()) {
                self.emit(e, out);
            }
        }
    }

    fn emit(&mut self, event: GameEvent, out: &mut Vec<GameEvent>) {
        self.app.on_game_event(event);
        out.push(event);
    }

    /// Current session view for rendering
    pub fn snapshot(&self) -> SessionSnapshot {
        self.app.session.snapshot()
    }

    /// Render interpolation between the last two ticks
    pub fn alpha(&self) -> f32 {
        self.timestep.alpha()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppContext, Screen};

    fn playing_driver() -> Driver {
        let mut driver = Driver::new(App::new(AppContext::default(), 11));
        driver.push(SessionEvent::Menu(MenuAction::StartGame));
        driver.run_pending();
        driver
    }

    #[test]
    fn test_one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn test_accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn test_caps_substeps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(5.0), MAX_SUBSTEPS);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.accumulate(f32::NAN), 0);
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut q = EventQueue::new();
        q.push(SessionEvent::Place);
        q.push(SessionEvent::Frame { dt: 0.1 });
        assert_eq!(q.len(), 2);
        assert_eq!(
            q.drain(),
            vec![SessionEvent::Place, SessionEvent::Frame { dt: 0.1 }]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn test_place_before_frame_lands_at_start() {
        let mut driver = playing_driver();
        driver.push(SessionEvent::Place);
        driver.push(SessionEvent::Frame { dt: SIM_DT * 3.0 });
        let events = driver.run_pending();
        assert!(matches!(events[0], GameEvent::BlockPlaced { tower_len: 2, .. }));
        assert_eq!(driver.app.session.tower.top().x, 0.0);
    }

    #[test]
    fn test_frames_move_block() {
        let mut driver = playing_driver();
        let x0 = driver.snapshot().falling.x;
        driver.push(SessionEvent::Frame { dt: SIM_DT * 3.5 });
        assert!(driver.run_pending().is_empty());
        assert!(driver.snapshot().falling.x > x0);
        assert_eq!(driver.app.session.time_ticks, 3);
    }

    #[test]
    fn test_place_ignored_outside_playing() {
        let mut driver = Driver::new(App::new(AppContext::default(), 11));
        driver.push(SessionEvent::Place);
        driver.push(SessionEvent::Frame { dt: 0.1 });
        assert!(driver.run_pending().is_empty());
        assert_eq!(driver.app.session.tower.len(), 1);
        assert_eq!(driver.app.session.time_ticks, 0);
    }

    #[test]
    fn test_miss_moves_to_game_over_screen() {
        let mut driver = playing_driver();
        driver.push(SessionEvent::Place);
        driver.run_pending();
        // Falling block now sits at a playfield edge, far from the tower top
        driver.app.session.falling = driver.app.session.falling.with_x(500.0);
        driver.push(SessionEvent::Place);
        driver.push(SessionEvent::Frame { dt: 0.1 });
        let events = driver.run_pending();
        assert_eq!(
            events,
            vec![GameEvent::GameOver {
                score: 20,
                tower_len: 2
            }]
        );
        assert_eq!(driver.app.screen, Screen::GameOver { score: 20 });
        assert_eq!(driver.app.ctx.high_score(), 20);
    }

    #[test]
    fn test_idle_mode_plays() {
        let mut driver = playing_driver();
        driver.idle_mode = true;
        for _ in 0..300 {
            driver.push(SessionEvent::Frame { dt: SIM_DT });
            driver.run_pending();
        }
        assert!(driver.app.session.tower.len() > 2);
    }
}
