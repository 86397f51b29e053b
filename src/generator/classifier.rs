// ============================================
// Generator - Классификатор движения в события шагов
// ============================================
// Каждый тик: simulate_footsteps -> simulate_airborne -> simulate_brushes.
// Стопа меняется ровно один раз на одиночный шаг. Прыжок/приземление
// на обе ноги и одиночный прыжок с разбега стопу не меняют.

use crate::acoustics::{AcousticOptions, Association, EntityId, EventType, SoundSource};
use crate::audio::{PlaybackSink, SoundPlayer};
use crate::blocks::BlockPos;
use crate::core::{FootstepConfig, WorldContext};
use crate::solver::Resolver;

use super::gait::{Gait, GaitProfile};
use super::sample::MotionSample;
use super::state::StepState;

/// Собственный счётчик расстояния масштабируется так же, как у хоста
const DISTANCE_FACTOR: f64 = 0.6;
/// Порог скалярного произведения скоростей (остановка/разворот)
const SCALAR_THRESHOLD: f64 = 0.001;
/// Перепад высоты, который считается ступенькой
const STAIR_DELTA: f64 = 0.4;
/// Смещение стоп вниз при прыжке
const JUMP_FOOT_OFFSET: f64 = 0.4;
/// Дополнительное смещение пробы зарослей в воздухе
const BRUSH_AIR_OFFSET: f64 = 0.25;
/// Шаг вниз по лестнице срабатывает всегда
const ALWAYS_STEP: f32 = -1.0;

/// Всё, что нужно одному тику
struct Tick<'t, 'w, S: PlaybackSink> {
    sample: &'t MotionSample,
    ctx: &'t WorldContext<'w>,
    resolver: Resolver<'w>,
    player: &'t mut SoundPlayer<S>,
}

/// Генератор шагов одной сущности
#[derive(Debug, Clone)]
pub struct Generator {
    entity: EntityId,
    state: StepState,
    gait: Gait,
}

impl Generator {
    pub fn new(entity: EntityId, profile: GaitProfile, config: &FootstepConfig) -> Self {
        Self {
            entity,
            state: StepState::new(),
            gait: Gait::from_profile(profile, config.rng_seed, entity),
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn state(&self) -> &StepState {
        &self.state
    }

    pub fn gait(&self) -> &Gait {
        &self.gait
    }

    pub fn is_right_foot(&self) -> bool {
        self.state.right_foot
    }

    /// Обработать один тик движения
    pub fn generate_footsteps<S: PlaybackSink>(
        &mut self,
        sample: &MotionSample,
        ctx: &WorldContext<'_>,
        player: &mut SoundPlayer<S>,
    ) {
        let mut tick = Tick {
            sample,
            ctx,
            resolver: Resolver::new(*ctx),
            player,
        };
        self.simulate_footsteps(&mut tick);
        self.simulate_airborne(&mut tick);
        self.simulate_brushes(&mut tick);
    }

    // ============================================
    // Шаги по земле, воде и лестницам
    // ============================================

    fn simulate_footsteps<S: PlaybackSink>(&mut self, tick: &mut Tick<'_, '_, S>) {
        let sample = tick.sample;
        let config = tick.ctx.config;
        self.state.stepped_this_frame = false;

        let delta = self
            .state
            .prev_position
            .map_or(0.0, |prev| (sample.position - prev).mag());
        self.state.prev_position = Some(sample.position);
        if delta > config.teleport_distance {
            log::debug!("Entity {} jumped {:.1} blocks in one tick, resetting stride", self.entity, delta);
            self.state.distance_walked = 0.0;
        } else {
            self.state.distance_walked += delta * DISTANCE_FACTOR;
        }
        let reference = self.state.distance_walked;

        if self.state.dmw_base > reference {
            self.state.dmw_base = 0.0;
            self.state.y_change_marker = 0.0;
        }

        // Остановка или разворот - "wander"
        let prev = self.state.prev_motion;
        let scal = sample.motion.x * prev.x + sample.motion.z * prev.z;
        let stopping = scal < SCALAR_THRESHOLD;
        if self.state.scalar_state != stopping {
            self.state.scalar_state = stopping;
            if stopping && config.play_wander && !has_special_stopping_condition(sample) {
                let foot = self.state.right_foot;
                self.play_singlefoot(tick, 0.0, EventType::Wander, foot);
            }
        }
        self.state.prev_motion = sample.motion;

        if sample.on_ground || sample.in_water || sample.on_ladder {
            let mut dwm = reference - self.state.dmw_base;
            let immobile = self
                .state
                .stopped_immobile(reference, tick.ctx.now_ms, config.immobile_duration);
            if immobile && !sample.on_ladder {
                dwm = 0.0;
                self.state.dmw_base = reference;
            }

            let last_y = self.state.last_grounded_y.unwrap_or(sample.position.y);
            let mut event = None;
            let distance = if sample.on_ladder && !sample.on_ground {
                config.stride_ladder
            } else if !sample.in_water && (last_y - sample.position.y).abs() > STAIR_DELTA {
                self.state.y_change_marker = reference;
                if last_y < sample.position.y {
                    event = Some(speed_disambiguator(sample, config, EventType::Up, EventType::UpRun));
                    config.stride_stair
                } else if !sample.sneaking {
                    event = Some(speed_disambiguator(sample, config, EventType::Down, EventType::DownRun));
                    ALWAYS_STEP
                } else {
                    config.stride
                }
            } else {
                config.stride
            };

            let event = event.unwrap_or_else(|| speed_disambiguator(sample, config, EventType::Walk, EventType::Run));
            let distance = self.gait.reevaluate_distance(event, distance);

            if dwm > distance as f64 {
                self.produce_step(tick, event, 0.0);
                if self.gait.stepped(event) {
                    self.produce_step(tick, event, 0.0);
                }
                self.state.dmw_base = reference;
            }
        }

        // Пока в воздухе между ступеньками, высота не обновляется
        if sample.on_ground {
            self.state.last_grounded_y = Some(sample.position.y);
        }
    }

    fn produce_step<S: PlaybackSink>(&mut self, tick: &mut Tick<'_, '_, S>, event: EventType, vertical_offset: f64) {
        if !self.play_special_stopping_condition(tick) {
            let foot = self.state.right_foot;
            self.play_singlefoot(tick, vertical_offset, event, foot);
            self.state.right_foot = !self.state.right_foot;
        }
        self.state.stepped_this_frame = true;
    }

    /// В воде вместо шага играет плавание; стопа не меняется
    fn play_special_stopping_condition<S: PlaybackSink>(&mut self, tick: &mut Tick<'_, '_, S>) -> bool {
        let sample = tick.sample;
        if !has_special_stopping_condition(sample) {
            return false;
        }
        let config = tick.ctx.config;
        let registry = tick.ctx.registry;

        match registry.acoustic(&config.swim_acoustic) {
            Some(acoustic) => {
                let volume = (sample.speed() * 1.25).min(1.0) as f32;
                let event = if sample.submerged { EventType::Swim } else { EventType::Walk };
                let options = AcousticOptions { gliding_volume: Some(volume) };
                let source = SoundSource::new(self.entity, sample.position);
                tick.player.play_acoustic(tick.ctx.now_ms, &source, acoustic, event, &options);
            }
            None => log::trace!("Swim acoustic '{}' is not registered", config.swim_acoustic),
        }
        true
    }

    // ============================================
    // Прыжки и приземления
    // ============================================

    fn simulate_airborne<S: PlaybackSink>(&mut self, tick: &mut Tick<'_, '_, S>) {
        let sample = tick.sample;
        let grounded = sample.on_ground || sample.on_ladder;
        if grounded == self.state.flying {
            self.state.flying = !self.state.flying;
            self.simulate_jumping_landing(tick);
        }
        if self.state.flying {
            self.state.fall_distance = sample.fall_distance;
        }
    }

    fn simulate_jumping_landing<S: PlaybackSink>(&mut self, tick: &mut Tick<'_, '_, S>) {
        let sample = tick.sample;
        let config = tick.ctx.config;
        if has_special_stopping_condition(sample) {
            return;
        }

        let jumping = sample.jumping || sample.motion.y > 0.0;
        if self.state.flying && jumping {
            if !config.event_on_jump {
                return;
            }
            if sample.horizontal_speed_sq() < config.speed_to_jump_as_multifoot {
                self.play_multifoot(tick, JUMP_FOOT_OFFSET, EventType::Jump);
            } else {
                // Приземление начнётся с той же стопы, что и прыжок
                let foot = self.state.right_foot;
                self.play_singlefoot(tick, JUMP_FOOT_OFFSET, EventType::Jump, foot);
            }
        } else if !self.state.flying {
            if self.state.fall_distance > config.land_hard_distance_min {
                self.play_multifoot(tick, 0.0, EventType::Land);
            } else if !self.state.stepped_this_frame && !sample.sneaking {
                let event = speed_disambiguator(sample, config, EventType::Climb, EventType::ClimbRun);
                let foot = self.state.right_foot;
                self.play_singlefoot(tick, 0.0, event, foot);
                self.state.right_foot = !self.state.right_foot;
            }
        }
    }

    // ============================================
    // Заросли
    // ============================================

    fn simulate_brushes<S: PlaybackSink>(&mut self, tick: &mut Tick<'_, '_, S>) {
        let sample = tick.sample;
        let now = tick.ctx.now_ms;
        if self.state.brush_next_ms > now {
            return;
        }
        self.state.brush_next_ms = now + tick.ctx.config.brush_interval;

        if !sample.is_moving_horizontally() || sample.sneaking {
            return;
        }

        let offset = if sample.on_ground { 0.0 } else { BRUSH_AIR_OFFSET };
        let pos = BlockPos::containing(sample.position.x, sample.position.y - 0.1 - offset, sample.position.z);
        match tick.resolver.find_messy_foliage(pos) {
            Some(assoc) => {
                if self.state.last_brushed != assoc.pos() {
                    self.state.last_brushed = assoc.pos();
                    self.play_association(tick, &assoc, EventType::Walk);
                }
            }
            None => self.state.last_brushed = None,
        }
    }

    // ============================================
    // Воспроизведение
    // ============================================

    fn play_singlefoot<S: PlaybackSink>(
        &mut self,
        tick: &mut Tick<'_, '_, S>,
        vertical_offset: f64,
        event: EventType,
        right_foot: bool,
    ) {
        if let Some(assoc) = tick.resolver.find_association_for_foot(tick.sample, vertical_offset, right_foot) {
            self.play_association(tick, &assoc, event);
        }
    }

    /// Обе стопы; одинаковые непустые ассоциации играют один раз (активной стопой)
    fn play_multifoot<S: PlaybackSink>(&mut self, tick: &mut Tick<'_, '_, S>, vertical_offset: f64, event: EventType) {
        let mut left = tick.resolver.find_association_for_foot(tick.sample, vertical_offset, false);
        let mut right = tick.resolver.find_association_for_foot(tick.sample, vertical_offset, true);

        let same = match (&left, &right) {
            (Some(l), Some(r)) => l == r && !l.is_native_fallback(),
            _ => false,
        };
        if same {
            if self.state.right_foot {
                left = None;
            } else {
                right = None;
            }
        }

        for assoc in [left, right].into_iter().flatten() {
            self.play_association(tick, &assoc, event);
        }
    }

    fn play_association<S: PlaybackSink>(&self, tick: &mut Tick<'_, '_, S>, assoc: &Association, event: EventType) {
        let position = assoc.foot().unwrap_or(tick.sample.position);
        let source = SoundSource::new(self.entity, position);
        tick.player.play_association(tick.ctx, &source, assoc, event);
    }
}

/// В воде обычные шаги и прыжки не звучат
fn has_special_stopping_condition(sample: &MotionSample) -> bool {
    sample.in_water
}

fn speed_disambiguator(sample: &MotionSample, config: &FootstepConfig, walk: EventType, run: EventType) -> EventType {
    if sample.horizontal_speed_sq() > config.speed_to_run {
        run
    } else {
        walk
    }
}
