use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignPhase {
    #[default]
    InProgress,
    /// The player asked to end the mission and has yet to confirm.
    AwaitingConfirmation,
    /// Mission won, waiting for the player to move on.
    Cleared,
    Failed,
}

impl CampaignPhase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Cleared | Self::Failed)
    }
}

/// Counters that start over with every mission.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionStats {
    pub moves: u32,
    pub flags: u32,
    pub visible: CellCount,
    /// Revealed plus marked tiles.
    pub cleared: u32,
    pub mines_placed: CellCount,
}

/// Runs a campaign of missions on a single board.
///
/// Owns armor, score and level bookkeeping, and turns board results into phase
/// changes. All tile effects go through [`Board`]. Invalid actions for the
/// current phase are ignored and produce an empty [`Frame`].
#[derive(Clone, Debug)]
pub struct MissionController<H = MemoryStore, S = RandomSampler> {
    config: CampaignConfig,
    board: Board,
    store: H,
    sampler: S,
    phase: CampaignPhase,
    level: u32,
    armor: u8,
    score: u32,
    high_score: u32,
    disarmed_total: u32,
    mission: MissionStats,
}

impl<H: HighScoreStore> MissionController<H, RandomSampler> {
    pub fn with_seed(config: CampaignConfig, store: H, seed: u64) -> Result<Self> {
        Self::new(config, store, RandomSampler::new(seed))
    }
}

impl<H: HighScoreStore, S: MineSampler> MissionController<H, S> {
    pub fn new(config: CampaignConfig, store: H, sampler: S) -> Result<Self> {
        config.validate()?;

        let mut board = config.build_board();
        board.take_changes();
        let high_score = store.high_score();
        log::debug!(
            "Campaign on a {:?} board, high score {}",
            board.size(),
            high_score
        );

        Ok(Self {
            config,
            board,
            store,
            sampler,
            phase: CampaignPhase::default(),
            level: 0,
            armor: config.max_armor,
            score: 0,
            high_score,
            disarmed_total: 0,
            mission: MissionStats::default(),
        })
    }

    pub fn config(&self) -> &CampaignConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn store(&self) -> &H {
        &self.store
    }

    pub fn phase(&self) -> CampaignPhase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn armor(&self) -> u8 {
        self.armor
    }

    /// Score accumulated over the campaign so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn disarmed_total(&self) -> u32 {
        self.disarmed_total
    }

    pub fn mission(&self) -> MissionStats {
        self.mission
    }

    /// Every tile of the board, for drawing from scratch.
    pub fn snapshot(&self) -> Frame {
        Frame {
            changes: self
                .board
                .tiles()
                .map(|(pos, tile)| TileChange::new(pos, tile))
                .collect(),
            events: Vec::new(),
        }
    }

    pub fn apply(&mut self, action: Action) -> Frame {
        log::trace!("{:?} in {:?}", action, self.phase);
        match action {
            Action::Search(pos) => self.reveal(pos),
            Action::Mark(pos, kind) => self.toggle_mark(pos, kind),
            Action::RequestComplete => self.request_complete_mission(),
            Action::CancelComplete => self.cancel_complete_mission(),
            Action::ConfirmComplete => self.complete_mission(),
            Action::Advance => self.advance_mission(),
            Action::Restart => self.restart_campaign(),
        }
    }

    /// Searches a tile.
    ///
    /// The first search of a mission lays out the mines around it. Mines hit
    /// directly or set off because their whole neighbourhood got revealed each
    /// cost one armor; without armor the mission fails on the spot.
    pub fn reveal(&mut self, pos: Coord2) -> Frame {
        debug_assert!(self.board.contains(pos), "{pos:?} is out of bounds");
        let mut frame = Frame::default();

        if !self.phase.is_playing() || self.board.tile(pos).visibility != Visibility::Hidden {
            return frame;
        }

        if self.mission.visible == 0 {
            let difficulty = self.config.difficulty.for_level(self.level);
            self.mission.mines_placed = self.board.generate(pos, difficulty, &mut self.sampler);
        }

        let revealed = self.board.reveal(pos);
        if revealed == 0 {
            frame.events.push(MissionEvent::SearchRestricted { at: pos });
            return self.finish(frame);
        }
        self.mission.moves += 1;
        self.count_revealed(revealed);

        if self.board.tile(pos).is_mine() && !self.absorb_blast(pos, false, &mut frame) {
            self.fail(FailReason::Detonation { at: pos }, &mut frame);
            return self.finish(frame);
        }

        let mut pending = self.board.check_adjacent_triggers(pos);
        while let Some(mine) = pending.pop() {
            let tile = self.board.tile(mine);
            // reachable from several revealed tiles, resolve once
            if !tile.is_mine() || tile.visibility.is_revealed() {
                continue;
            }

            if self.board.clear_mark(mine) != 0 {
                self.mission.flags = self.mission.flags.saturating_sub(1);
                self.mission.cleared = self.mission.cleared.saturating_sub(1);
            }
            let revealed = self.board.force_reveal(mine);
            self.count_revealed(revealed);

            if !self.absorb_blast(mine, true, &mut frame) {
                self.fail(FailReason::Detonation { at: mine }, &mut frame);
                break;
            }
            pending.extend(self.board.check_adjacent_triggers(mine));
        }

        self.finish(frame)
    }

    pub fn toggle_mark(&mut self, pos: Coord2, kind: MarkKind) -> Frame {
        debug_assert!(self.board.contains(pos), "{pos:?} is out of bounds");

        if !self.phase.is_playing() || self.board.tile(pos).visibility.is_revealed() {
            return Frame::default();
        }

        let delta = i32::from(self.board.toggle_mark(pos, kind));
        self.mission.flags = self.mission.flags.saturating_add_signed(delta);
        self.mission.cleared = self.mission.cleared.saturating_add_signed(delta);
        self.mission.moves += 1;

        self.finish(Frame::default())
    }

    /// Asks to end the mission, only once something has been revealed.
    pub fn request_complete_mission(&mut self) -> Frame {
        let mut frame = Frame::default();
        if self.phase.is_playing() && self.mission.visible > 0 {
            self.phase = CampaignPhase::AwaitingConfirmation;
            frame.events.push(MissionEvent::CompletionPending);
        }
        frame
    }

    pub fn cancel_complete_mission(&mut self) -> Frame {
        if matches!(self.phase, CampaignPhase::AwaitingConfirmation) {
            self.phase = CampaignPhase::InProgress;
        }
        Frame::default()
    }

    /// Ends the mission by revealing the board.
    ///
    /// Any unmarked live mine fails the mission, otherwise it is cleared and scored.
    pub fn complete_mission(&mut self) -> Frame {
        let mut frame = Frame::default();
        if !matches!(self.phase, CampaignPhase::AwaitingConfirmation) {
            return frame;
        }

        let summary = self.board.reveal_all();
        if summary.active > 0 {
            self.phase = CampaignPhase::Failed;
            log::debug!("Mission {} failed with {} live mines", self.level, summary.active);
            frame.events.push(MissionEvent::MissionFailed {
                reason: FailReason::UnresolvedMines,
                active_mines: summary.active,
            });
            return self.finish(frame);
        }

        let card = ScoreCard {
            markers: summary.markers,
            disarmed: summary.disarmed,
            moves: self.mission.moves,
            mines_placed: self.mission.mines_placed,
            total_tiles: self.board.total_tiles(),
        };
        let score = card.score();
        self.score = self.score.saturating_add(score);
        self.disarmed_total += u32::from(summary.disarmed);
        self.phase = CampaignPhase::Cleared;
        log::debug!("Mission {} cleared: {:?} scored {}", self.level, card, score);

        frame.events.push(MissionEvent::MissionCleared {
            markers: summary.markers,
            disarmed: summary.disarmed,
            score,
        });

        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.set_high_score(self.score);
            frame.events.push(MissionEvent::NewHighScore { score: self.score });
        }

        self.finish(frame)
    }

    /// Moves from a cleared mission to the next, harder one.
    pub fn advance_mission(&mut self) -> Frame {
        if !matches!(self.phase, CampaignPhase::Cleared) {
            return Frame::default();
        }

        self.level += 1;
        self.armor = self.armor.saturating_add(1).min(self.config.max_armor);
        self.start_mission()
    }

    /// Starts over from the first mission after a failure.
    pub fn restart_campaign(&mut self) -> Frame {
        if !matches!(self.phase, CampaignPhase::Failed) {
            return Frame::default();
        }

        self.level = 0;
        self.armor = self.config.max_armor;
        self.score = 0;
        self.disarmed_total = 0;
        self.start_mission()
    }

    fn start_mission(&mut self) -> Frame {
        self.mission = MissionStats::default();
        self.board.reset();
        self.phase = CampaignPhase::InProgress;
        log::debug!("Mission {} started with {} armor", self.level, self.armor);

        let mut frame = Frame::default();
        frame.events.push(MissionEvent::MissionStarted {
            level: self.level,
            armor: self.armor,
        });
        self.finish(frame)
    }

    /// Spends one armor on the mine at `pos`, returning false when none is left.
    fn absorb_blast(&mut self, pos: Coord2, triggered: bool, frame: &mut Frame) -> bool {
        if self.armor == 0 {
            return false;
        }

        self.armor -= 1;
        self.board.block_mine(pos);
        log::debug!("Armor blocked mine at {:?}, {} left", pos, self.armor);
        frame.events.push(MissionEvent::MineBlocked {
            at: pos,
            armor: self.armor,
            triggered,
        });
        true
    }

    fn fail(&mut self, reason: FailReason, frame: &mut Frame) {
        let summary = self.board.reveal_all();
        self.phase = CampaignPhase::Failed;
        log::debug!("Mission {} failed: {:?}", self.level, reason);
        frame.events.push(MissionEvent::MissionFailed {
            reason,
            active_mines: summary.active,
        });
    }

    fn count_revealed(&mut self, revealed: CellCount) {
        self.mission.visible += revealed;
        self.mission.cleared += u32::from(revealed);
    }

    fn finish(&mut self, mut frame: Frame) -> Frame {
        frame.changes = self.board.take_changes();
        frame
    }
}
