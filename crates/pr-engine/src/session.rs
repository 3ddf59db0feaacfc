//! DrawSession: session state and the draw state machine

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use pr_core::{COST_PER_DRAW, SAMPLE_MAX, SAMPLE_MIN};
use pr_stage::{Clock, DrawTimeline, RollerGeometry, RollerPlan, TimingConfig, TimingProfile};
use pr_table::{PrizeTable, TableCompiler, TableError};

use crate::config::EngineConfig;
use crate::draw::{DrawOutcome, DrawResult, reveal_message};
use crate::error::{DrawError, EngineResult, SessionError};
use crate::stats::{DrawHistory, DrawRecord, SessionStats};

/// Snapshot for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub user_name: String,
    pub points: u64,
    /// Draw control enabled
    pub can_draw: bool,
    /// An animation is still running
    pub busy: bool,
    /// Label for the draw control
    pub draw_prompt: String,
}

/// One user's lottery session
///
/// Holds the user, the points balance and the active prize table. Only
/// [`DrawSession::draw`] and the session operations change them.
pub struct DrawSession {
    user_name: String,
    points: u64,
    table: PrizeTable,
    /// Draw whose animation is running, from draw start until its reveal
    active_draw: Option<String>,
    rng: StdRng,
    timing: TimingConfig,
    compiler: TableCompiler,
    draw_count: u64,
    stats: SessionStats,
    history: DrawHistory,
}

impl DrawSession {
    /// Create an empty session with default config
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Create with specific config (timing, seed, history size)
    pub fn with_config(config: &EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            user_name: String::new(),
            points: 0,
            table: PrizeTable::empty(),
            active_draw: None,
            rng,
            timing: config.timing_config(),
            compiler: config.compiler(),
            draw_count: 0,
            stats: SessionStats::default(),
            history: DrawHistory::new(config.history_limit),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SESSION BOUNDARY
    // ═══════════════════════════════════════════════════════════════════════════

    /// Start a session for a user, replacing whatever was there.
    ///
    /// A draw still animating is abandoned: its reveal no longer releases
    /// the draw control.
    pub fn start_session(
        &mut self,
        user_name: &str,
        initial_points: u64,
        table: PrizeTable,
    ) -> Result<(), SessionError> {
        let user_name = user_name.trim();
        if user_name.is_empty() {
            return Err(SessionError::EmptyUserName);
        }

        self.user_name = user_name.to_string();
        self.points = initial_points;
        self.table = table;
        self.clear_progress();

        log::info!(
            "Session started: {} with {} points, {} prizes",
            self.user_name,
            self.points,
            self.table.len()
        );
        Ok(())
    }

    /// Clear user, points and prize table
    pub fn reset_session(&mut self) {
        self.user_name.clear();
        self.points = 0;
        self.table = PrizeTable::empty();
        self.clear_progress();
        log::info!("Session reset");
    }

    /// Same as [`DrawSession::reset_session`]
    pub fn clear(&mut self) {
        self.reset_session();
    }

    // draw_count is kept so draw IDs are never reused by a later session
    fn clear_progress(&mut self) {
        self.active_draw = None;
        self.stats = SessionStats::default();
        self.history.clear();
    }

    /// Compile `raw` and make it the active table. On error the current
    /// table stays in place. Returns the confirmation text.
    pub fn replace_table_from_text(&mut self, raw: &str) -> Result<String, TableError> {
        let compiled = self.compiler.compile(raw)?;
        let summary = compiled.summary();
        self.table = compiled.into_table();
        log::info!("Prize table replaced: {}", summary);
        Ok(summary)
    }

    /// Replace the active table
    pub fn set_table(&mut self, table: PrizeTable) {
        self.table = table;
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Seed RNG for reproducible results
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Set timing profile
    pub fn set_timing(&mut self, profile: TimingProfile) {
        self.timing = TimingConfig::from_profile(profile);
    }

    /// Set explicit timing
    pub fn set_timing_config(&mut self, timing: TimingConfig) {
        self.timing = timing;
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // STATE
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn table(&self) -> &PrizeTable {
        &self.table
    }

    pub fn is_busy(&self) -> bool {
        self.active_draw.is_some()
    }

    /// ID of the draw whose animation is running
    pub fn active_draw(&self) -> Option<&str> {
        self.active_draw.as_deref()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn history(&self) -> &DrawHistory {
        &self.history
    }

    /// Draw control enabled
    pub fn can_draw(&self) -> bool {
        !self.is_busy() && self.points >= COST_PER_DRAW && !self.table.is_empty()
    }

    /// Label for the draw control
    pub fn draw_prompt(&self) -> String {
        if self.points < COST_PER_DRAW {
            format!("Not enough points (need {COST_PER_DRAW})")
        } else {
            format!("Spend {COST_PER_DRAW} points to draw!")
        }
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            user_name: self.user_name.clone(),
            points: self.points,
            can_draw: self.can_draw(),
            busy: self.is_busy(),
            draw_prompt: self.draw_prompt(),
        }
    }

    /// Roller layout for the active table
    pub fn geometry(&self) -> RollerGeometry {
        RollerGeometry::new(self.table.len())
    }

    /// Names on the roller, the table repeated once per copy
    pub fn roller_strip(&self) -> Vec<String> {
        self.geometry().strip(self.table.names())
    }

    /// Roller translation shown before the first draw
    pub fn initial_roller_offset(&self) -> f64 {
        self.geometry().initial_offset()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // DRAW EXECUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Run a random draw
    pub fn draw(&mut self, clock: &dyn Clock) -> EngineResult<DrawOutcome> {
        let draw_id = self.begin_draw()?;
        let sampled_value = self.rng.random_range(SAMPLE_MIN..=SAMPLE_MAX);
        Ok(self.resolve_draw(draw_id, sampled_value, clock))
    }

    /// Run a draw with a chosen sample (values outside `1..=10000` land on the sentinel)
    pub fn draw_forced(&mut self, sampled_value: u32, clock: &dyn Clock) -> EngineResult<DrawOutcome> {
        let draw_id = self.begin_draw()?;
        Ok(self.resolve_draw(draw_id, sampled_value, clock))
    }

    /// Release the draw control once the reveal phase of `draw_id` has been
    /// shown. Reveals of any other draw are ignored. Returns whether another
    /// draw is possible with the current balance.
    pub fn finish_draw(&mut self, draw_id: &str) -> bool {
        if self.active_draw.as_deref() == Some(draw_id) {
            self.active_draw = None;
        } else {
            log::debug!("{}: reveal ignored, not the running draw", draw_id);
        }
        self.can_draw()
    }

    /// Check preconditions, then lock and debit. Nothing changes on error.
    /// Returns the new draw's ID.
    fn begin_draw(&mut self) -> EngineResult<String> {
        if self.is_busy() {
            return Err(DrawError::DrawInProgress);
        }
        if self.points < COST_PER_DRAW {
            return Err(DrawError::InsufficientPoints {
                balance: self.points,
                cost: COST_PER_DRAW,
            });
        }
        if self.table.is_empty() {
            return Err(DrawError::NoPrizesConfigured);
        }

        self.draw_count += 1;
        let draw_id = format!("draw-{:06}", self.draw_count);
        self.active_draw = Some(draw_id.clone());
        self.points -= COST_PER_DRAW;
        Ok(draw_id)
    }

    fn resolve_draw(&mut self, draw_id: String, sampled_value: u32, clock: &dyn Clock) -> DrawOutcome {
        let selection = self.table.select(sampled_value);
        let geometry = self.geometry();
        let prizes_per_set = geometry.prizes_per_set;

        // The sentinel is not on the strip; rest it on the last slot of the set
        let position = selection.index.unwrap_or(prizes_per_set - 1);
        let target_index = geometry.target_index(position);
        let jump_index = geometry.jump_index(self.rng.random_range(0..prizes_per_set));

        let result = DrawResult {
            draw_id: draw_id.clone(),
            sampled_value,
            prize_index: selection.index,
            selected_prize: selection.entry,
            roller_target_index: target_index,
            balance_after: self.points,
        };

        if result.is_sentinel() {
            log::warn!("{}: sample {} matched no prize", draw_id, sampled_value);
        }
        log::debug!(
            "{}: {} drew {} (sample {}), balance {}",
            draw_id,
            self.user_name,
            result.selected_prize.name,
            sampled_value,
            self.points
        );

        let timeline = DrawTimeline::plan(
            draw_id,
            clock.now_ms(),
            &geometry,
            &self.timing,
            RollerPlan {
                jump_index,
                target_index,
                prize_name: result.selected_prize.name.clone(),
                message: reveal_message(&self.user_name, &result.selected_prize.name),
            },
        );

        self.stats.record(&result, COST_PER_DRAW);
        self.history.push(DrawRecord::new(&self.user_name, &result));

        DrawOutcome { result, timeline }
    }
}

impl Default for DrawSession {
    fn default() -> Self {
        Self::new()
    }
}
