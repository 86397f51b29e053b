// ============================================
// Association - "Что играть в этой точке"
// ============================================
// Три разных исхода:
// - not_emitter: блок никогда не звучит (сильнее любых наложений)
// - пустой список акустик: играть родной звук блока
// - непустой список: играть акустики по порядку (порядок = слои)
// Наложения (броня) хранятся отдельно и только добавляются.

use std::sync::Arc;

use ultraviolet::DVec3;

use crate::blocks::{BlockPos, BlockState, SoundType};

use super::definition::AcousticRef;

#[derive(Debug, Clone, Default)]
pub struct Association {
    state: Option<BlockState>,
    pos: Option<BlockPos>,
    acoustics: Vec<AcousticRef>,
    overlays: Vec<AcousticRef>,
    not_emitter: bool,
    liquid: bool,
    sound_type: Option<SoundType>,
    /// Мировая позиция стопы (для отпечатков)
    foot: Option<DVec3>,
}

impl Association {
    /// Ассоциация для реального блока
    pub fn for_block(state: BlockState, pos: BlockPos) -> Self {
        Self {
            state: Some(state),
            pos: Some(pos),
            ..Default::default()
        }
    }

    /// Синтетическая ассоциация без блока (только наложения)
    pub fn synthetic() -> Self {
        Self::default()
    }

    /// Блок никогда не звучит
    pub fn not_emitter(state: Option<BlockState>, pos: Option<BlockPos>) -> Self {
        Self {
            state,
            pos,
            not_emitter: true,
            ..Default::default()
        }
    }

    pub fn with_acoustics<I>(mut self, acoustics: I) -> Self
    where
        I: IntoIterator<Item = AcousticRef>,
    {
        if !self.not_emitter {
            self.acoustics.extend(acoustics);
        }
        self
    }

    pub fn with_acoustic(self, acoustic: AcousticRef) -> Self {
        self.with_acoustics(std::iter::once(acoustic))
    }

    /// Добавить наложение (броня); на not_emitter не действует
    pub fn with_overlay(mut self, acoustic: AcousticRef) -> Self {
        if !self.not_emitter {
            self.overlays.push(acoustic);
        }
        self
    }

    pub fn with_liquid(mut self, liquid: bool) -> Self {
        self.liquid = liquid;
        self
    }

    pub fn with_sound_type(mut self, sound_type: Option<SoundType>) -> Self {
        self.sound_type = sound_type;
        self
    }

    pub fn at_foot(mut self, foot: DVec3) -> Self {
        self.foot = Some(foot);
        self
    }

    pub fn state(&self) -> Option<BlockState> {
        self.state
    }

    pub fn pos(&self) -> Option<BlockPos> {
        self.pos
    }

    pub fn acoustics(&self) -> &[AcousticRef] {
        &self.acoustics
    }

    pub fn overlays(&self) -> &[AcousticRef] {
        &self.overlays
    }

    pub fn is_not_emitter(&self) -> bool {
        self.not_emitter
    }

    /// Нет явных акустик - играть родной звук блока
    pub fn is_native_fallback(&self) -> bool {
        !self.not_emitter && self.acoustics.is_empty()
    }

    /// Есть ли хоть что-то, что может прозвучать
    pub fn is_playable(&self) -> bool {
        !self.not_emitter
            && (!self.acoustics.is_empty() || !self.overlays.is_empty() || self.state.is_some())
    }

    pub fn is_liquid(&self) -> bool {
        self.liquid
    }

    pub fn sound_type(&self) -> Option<&SoundType> {
        self.sound_type.as_ref()
    }

    pub fn foot(&self) -> Option<DVec3> {
        self.foot
    }

    /// Имена акустик по порядку (без наложений)
    pub fn acoustic_names(&self) -> Vec<&str> {
        self.acoustics.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn overlay_names(&self) -> Vec<&str> {
        self.overlays.iter().map(|a| a.name.as_str()).collect()
    }
}

/// Равенство без учёта позиции стопы: две ноги на одном блоке совпадают
impl PartialEq for Association {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
            && self.pos == other.pos
            && self.not_emitter == other.not_emitter
            && same_acoustics(&self.acoustics, &other.acoustics)
            && same_acoustics(&self.overlays, &other.overlays)
    }
}

fn same_acoustics(a: &[AcousticRef], b: &[AcousticRef]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Arc::ptr_eq(x, y) || x.name == y.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::acoustics::{Acoustic, AcousticKind, BasicAcoustic};

    fn acoustic(name: &str) -> AcousticRef {
        Arc::new(Acoustic::new(
            name,
            AcousticKind::Basic(BasicAcoustic {
                sound: name.to_string(),
                volume: [1.0, 1.0],
                pitch: [1.0, 1.0],
                delay: None,
            }),
        ))
    }

    #[test]
    fn test_not_emitter_ignores_acoustics() {
        let assoc = Association::not_emitter(None, None)
            .with_acoustic(acoustic("step"))
            .with_overlay(acoustic("armor"));
        assert!(assoc.acoustics().is_empty());
        assert!(assoc.overlays().is_empty());
        assert!(!assoc.is_native_fallback());
        assert!(!assoc.is_playable());
    }

    #[test]
    fn test_layering_keeps_order_and_duplicates() {
        let step = acoustic("step");
        let assoc = Association::for_block(BlockState::new(1), BlockPos::new(0, 0, 0))
            .with_acoustics(vec![step.clone(), acoustic("grass"), step]);
        assert_eq!(assoc.acoustic_names(), ["step", "grass", "step"]);
    }

    #[test]
    fn test_overlay_keeps_native_fallback() {
        let assoc = Association::for_block(BlockState::new(1), BlockPos::new(0, 0, 0))
            .with_overlay(acoustic("armor"));
        assert!(assoc.is_native_fallback());
        assert_eq!(assoc.overlay_names(), ["armor"]);

        let synthetic = Association::synthetic();
        assert!(!synthetic.is_playable());
        assert!(synthetic.with_overlay(acoustic("armor")).is_playable());
    }

    #[test]
    fn test_equality_ignores_foot() {
        let base = Association::for_block(BlockState::new(1), BlockPos::new(0, 0, 0))
            .with_acoustic(acoustic("step"));
        let left = base.clone().at_foot(DVec3::new(0.3, 1.0, 0.5));
        let right = base.at_foot(DVec3::new(0.7, 1.0, 0.5));
        assert_eq!(left, right);
    }
}
