//! One match from countdown to knock-out
//!
//! Owns both fighters, the opponent policy, the pose pipeline and the
//! simulated clock. Nothing here is global: the driver holds a `Round` and
//! calls `tick` once per frame and `submit_pose` whenever inference finishes.

use rand::Rng;

use crate::classifier::{ActionDebouncer, ActionLabel, PoseClassifier};
use crate::config::GameConfig;
use crate::pose::PoseSample;

use super::{
    CombatEntity, CombatResolver, Countdown, Difficulty, EntityView, GameEvent, OpponentPolicy, OpponentProfile,
    Outcome, RoundPhase, RoundSnapshot, Side,
};

pub struct Round<R> {
    /// Simulated time (ms), advanced only by `tick`
    clock: f64,
    phase: RoundPhase,
    countdown: Countdown,

    classifier: PoseClassifier,
    debouncer: ActionDebouncer,
    /// Latest classifier output, kept for the HUD
    pose_label: ActionLabel,

    player: CombatEntity,
    opponent: CombatEntity,
    policy: OpponentPolicy<R>,
    resolver: CombatResolver,

    events: Vec<GameEvent>,
    outcome: Option<Outcome>,
}

impl<R: Rng> Round<R> {
    /// Start a round against the opponent matched to `character`
    pub fn new(config: &GameConfig, character: &str, rng: R) -> Self {
        let profile = OpponentProfile::for_character(character, &config.opponent);
        log::info!("round start: character {}, opponent {}", character, profile.difficulty);

        let countdown = Countdown::new(&config.countdown);
        let (phase, events) = if countdown.is_finished() {
            (RoundPhase::Fighting, vec![GameEvent::Countdown, GameEvent::Fight])
        } else {
            (RoundPhase::Countdown, vec![GameEvent::Countdown])
        };

        Self {
            clock: 0.0,
            phase,
            countdown,
            classifier: PoseClassifier::new(&config.classifier),
            debouncer: ActionDebouncer::new(config.debounce.interval_ms),
            pose_label: ActionLabel::Idle,
            player: CombatEntity::new(Side::Player, &config.combat),
            opponent: CombatEntity::new(Side::Opponent, &config.combat),
            policy: OpponentPolicy::new(profile, rng),
            resolver: CombatResolver::new(&config.combat),
            events,
            outcome: None,
        }
    }

    // ========================================================================
    // DRIVER ENTRY POINTS
    // ========================================================================

    /// Advance the round by `delta` ms and run one frame.
    ///
    /// A zero delta runs the frame without moving the clock. Negative and
    /// non-finite deltas are ignored, as is everything after the round stopped.
    pub fn tick(&mut self, delta: f64) {
        if !self.running() || !(delta >= 0.0 && delta.is_finite()) {
            return;
        }
        self.clock += delta;

        match self.phase {
            RoundPhase::Countdown => {
                if self.countdown.tick(delta) {
                    log::info!("fight!");
                    self.phase = RoundPhase::Fighting;
                    self.events.push(GameEvent::Fight);
                }
            }
            RoundPhase::Fighting => self.fight(delta),
            RoundPhase::Finished | RoundPhase::Aborted => {}
        }
    }

    fn fight(&mut self, delta: f64) {
        let now = self.clock;

        self.player.tick(delta);
        self.opponent.tick(delta);

        if let Some(action) = self.policy.poll(now) {
            if self.opponent.request_action(action, now) {
                self.policy.accepted(action, now);
                self.started(Side::Opponent, action);
            }
        }

        let resolution = self.resolver.resolve(&mut self.player, &mut self.opponent, now);
        for hit in resolution.hits {
            self.events.push(GameEvent::Hit {
                side: hit.defender,
                damage: hit.damage,
                health: hit.defender_health,
            });
        }

        if let Some(winner) = resolution.winner {
            self.finish(winner);
        }
    }

    /// Classify a finished inference and feed it to the player.
    ///
    /// Results arriving during the countdown or after the round stopped are
    /// classified for the HUD but never reach the player.
    pub fn submit_pose(&mut self, pose: &PoseSample) -> ActionLabel {
        let label = self.classifier.classify(pose);
        self.pose_label = label;

        let now = self.clock;
        let live = self.phase == RoundPhase::Fighting;
        let Some((action, accepted)) = self.debouncer.forward(label, now, live, &mut self.player) else {
            return label;
        };
        if !accepted {
            return label;
        }
        self.started(Side::Player, action);

        let opponent_busy = self.opponent.is_busy() || !self.opponent.can_act(now);
        if let Some(counter) = self.policy.react(action, opponent_busy, now) {
            if self.opponent.request_action(counter, now) {
                self.policy.countered(now);
                self.started(Side::Opponent, counter);
            }
        }

        label
    }

    /// Stop without a winner
    pub fn abort(&mut self) {
        if self.running() {
            log::info!("round aborted at {:.0}ms", self.clock);
            self.phase = RoundPhase::Aborted;
        }
    }

    /// Hand over queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn started(&mut self, side: Side, action: ActionLabel) {
        if action != ActionLabel::Idle {
            self.events.push(GameEvent::ActionStarted { side, action });
        }
    }

    fn finish(&mut self, winner: Side) {
        match winner {
            Side::Player => self.opponent.knock_out(),
            Side::Opponent => self.player.knock_out(),
        }

        let outcome = Outcome::new(winner, &self.player, &self.opponent);
        log::info!(
            "round over: {} wins ({} - {})",
            winner,
            outcome.player_health,
            outcome.opponent_health
        );

        self.outcome = Some(outcome);
        self.phase = RoundPhase::Finished;
        self.events.push(GameEvent::RoundOver { winner });
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// True until someone is knocked out or the round is aborted
    pub fn running(&self) -> bool {
        matches!(self.phase, RoundPhase::Countdown | RoundPhase::Fighting)
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn now(&self) -> f64 {
        self.clock
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn winner(&self) -> Option<Side> {
        self.outcome.map(|outcome| outcome.winner)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.policy.profile().difficulty
    }

    pub fn player(&self) -> &CombatEntity {
        &self.player
    }

    pub fn opponent(&self) -> &CombatEntity {
        &self.opponent
    }

    /// Shift the opponent sprite, clamped to its bounds
    pub fn move_opponent(&mut self, distance: f32) {
        self.opponent.move_horizontal(distance);
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            countdown: match self.phase {
                RoundPhase::Countdown => self.countdown.remaining(),
                _ => None,
            },
            time_ms: self.clock,
            player: EntityView::from(&self.player),
            opponent: EntityView::from(&self.opponent),
            pose_label: self.pose_label,
            outcome: self.outcome,
        }
    }
}
