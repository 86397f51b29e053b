// ============================================
// Acoustic Registry - Снимок акустики блоков
// ============================================
// Неизменяемый после сборки. При перезагрузке конфигурации собирается
// новый реестр и подменяется целиком между тиками.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::blocks::{BlockCatalog, BlockState, BlockType};
use crate::core::FootfallError;

use super::definition::{Acoustic, AcousticDef, AcousticKind, AcousticRef, BasicAcoustic};

/// Маркер "этот блок/слой никогда не звучит"
pub const NOT_EMITTER: &str = "NOT_EMITTER";

/// Вторичный тег поверх базового поиска акустики блока
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Substrate {
    Carpet,
    Foliage,
    Fence,
    Messy,
}

/// Класс надетой брони
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorClass {
    Light,
    Medium,
    Heavy,
    Crystal,
}

/// Результат поиска: набор акустик или запрет звучать
#[derive(Debug, Clone, PartialEq)]
pub enum BlockAcoustics {
    Emitter(Vec<AcousticRef>),
    NotEmitter,
}

impl BlockAcoustics {
    pub fn is_not_emitter(&self) -> bool {
        matches!(self, BlockAcoustics::NotEmitter)
    }

    /// Акустики (пусто для NOT_EMITTER)
    pub fn acoustics(&self) -> &[AcousticRef] {
        match self {
            BlockAcoustics::Emitter(list) => list,
            BlockAcoustics::NotEmitter => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct BlockKey {
    block: BlockType,
    meta: Option<u8>,
    substrate: Option<Substrate>,
}

#[derive(Debug, Default)]
struct PrimitiveEntries {
    bare: Option<BlockAcoustics>,
    by_substrate: HashMap<String, BlockAcoustics>,
}

/// Акустика по родному звуку блока (для блоков без явной записи)
#[derive(Debug, Default)]
pub struct PrimitiveMap {
    entries: HashMap<String, PrimitiveEntries>,
}

impl PrimitiveMap {
    /// Поиск по имени звука и субстрату (None = "голое" имя)
    pub fn lookup(&self, sound: &str, substrate: Option<&str>) -> Option<&BlockAcoustics> {
        let entries = self.entries.get(sound)?;
        match substrate {
            Some(key) => entries.by_substrate.get(key),
            None => entries.bare.as_ref(),
        }
    }

    fn insert(&mut self, sound: String, substrate: Option<String>, acoustics: BlockAcoustics) {
        let entries = self.entries.entry(sound).or_default();
        match substrate {
            Some(key) => {
                entries.by_substrate.insert(key, acoustics);
            }
            None => entries.bare = Some(acoustics),
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .values()
            .map(|e| e.by_substrate.len() + usize::from(e.bare.is_some()))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Снимок реестра акустики
#[derive(Debug, Default)]
pub struct AcousticRegistry {
    acoustics: HashMap<String, AcousticRef>,
    blocks: HashMap<BlockKey, BlockAcoustics>,
    primitives: PrimitiveMap,
    armor: HashMap<ArmorClass, AcousticRef>,
    foot_armor: HashMap<ArmorClass, AcousticRef>,
}

impl AcousticRegistry {
    /// Пустой реестр: всё разрешается через родные звуки блоков
    pub fn empty() -> Self {
        Self::default()
    }

    /// Собрать из JSON; строковые ID блоков берутся из каталога
    pub fn from_json(json: &str, catalog: &BlockCatalog) -> Result<Self, FootfallError> {
        let file: RegistryFile = serde_json::from_str(json)?;
        RegistryBuilder::from_file(file, catalog).build()
    }

    /// Именованная акустика
    pub fn acoustic(&self, name: &str) -> Option<&AcousticRef> {
        self.acoustics.get(name)
    }

    /// Поиск акустики блока: сначала точный meta, затем запись на весь блок
    pub fn lookup(&self, state: BlockState, substrate: Option<Substrate>) -> Option<&BlockAcoustics> {
        let exact = BlockKey { block: state.block, meta: Some(state.meta), substrate };
        self.blocks.get(&exact).or_else(|| {
            self.blocks.get(&BlockKey { block: state.block, meta: None, substrate })
        })
    }

    pub fn primitives(&self) -> &PrimitiveMap {
        &self.primitives
    }

    pub fn armor_acoustic(&self, class: ArmorClass) -> Option<&AcousticRef> {
        self.armor.get(&class)
    }

    pub fn foot_armor_acoustic(&self, class: ArmorClass) -> Option<&AcousticRef> {
        self.foot_armor.get(&class)
    }

    /// Количество записей блоков
    pub fn block_entries(&self) -> usize {
        self.blocks.len()
    }
}

// ============================================
// JSON формат реестра
// ============================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryFile {
    #[serde(default)]
    pub acoustics: HashMap<String, AcousticDef>,
    #[serde(default)]
    pub blocks: Vec<BlockMappingDef>,
    #[serde(default)]
    pub primitives: Vec<PrimitiveMappingDef>,
    #[serde(default)]
    pub armor: HashMap<ArmorClass, String>,
    #[serde(default)]
    pub foot_armor: HashMap<ArmorClass, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockMappingDef {
    /// String ID блока из каталога
    pub block: String,
    #[serde(default)]
    pub meta: Option<u8>,
    #[serde(default)]
    pub substrate: Option<Substrate>,
    /// Имена акустик или ["NOT_EMITTER"]
    pub acoustics: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimitiveMappingDef {
    pub sound: String,
    #[serde(default)]
    pub substrate: Option<String>,
    pub acoustics: Vec<String>,
}

// ============================================
// Builder
// ============================================

/// Сборщик снимка реестра
#[derive(Default)]
pub struct RegistryBuilder {
    defs: HashMap<String, AcousticDef>,
    blocks: Vec<(BlockKey, Vec<String>)>,
    primitives: Vec<(String, Option<String>, Vec<String>)>,
    armor: Vec<(ArmorClass, String)>,
    foot_armor: Vec<(ArmorClass, String)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_file(file: RegistryFile, catalog: &BlockCatalog) -> Self {
        let mut builder = Self::new();
        builder.defs = file.acoustics;

        for mapping in file.blocks {
            match catalog.numeric_id(&mapping.block) {
                Some(block) => {
                    let key = BlockKey { block, meta: mapping.meta, substrate: mapping.substrate };
                    builder.blocks.push((key, mapping.acoustics));
                }
                None => log::warn!("Acoustic mapping for unknown block '{}' skipped", mapping.block),
            }
        }
        for primitive in file.primitives {
            builder.primitives.push((primitive.sound, primitive.substrate, primitive.acoustics));
        }
        builder.armor.extend(file.armor);
        builder.foot_armor.extend(file.foot_armor);
        builder
    }

    /// Зарегистрировать именованную акустику
    pub fn acoustic(&mut self, name: &str, def: AcousticDef) -> &mut Self {
        self.defs.insert(name.to_string(), def);
        self
    }

    /// Привязать акустики к блоку. names = [NOT_EMITTER] запрещает звук.
    pub fn block(
        &mut self,
        block: BlockType,
        meta: Option<u8>,
        substrate: Option<Substrate>,
        names: &[&str],
    ) -> &mut Self {
        let key = BlockKey { block, meta, substrate };
        self.blocks.push((key, names.iter().map(|n| n.to_string()).collect()));
        self
    }

    pub fn primitive(&mut self, sound: &str, substrate: Option<&str>, names: &[&str]) -> &mut Self {
        self.primitives.push((
            sound.to_string(),
            substrate.map(str::to_string),
            names.iter().map(|n| n.to_string()).collect(),
        ));
        self
    }

    pub fn armor(&mut self, class: ArmorClass, name: &str) -> &mut Self {
        self.armor.push((class, name.to_string()));
        self
    }

    pub fn foot_armor(&mut self, class: ArmorClass, name: &str) -> &mut Self {
        self.foot_armor.push((class, name.to_string()));
        self
    }

    /// Разрешить все ссылки и собрать неизменяемый реестр
    pub fn build(&self) -> Result<AcousticRegistry, FootfallError> {
        let mut resolver = DefResolver {
            defs: &self.defs,
            resolved: HashMap::new(),
            visiting: HashSet::new(),
        };

        let mut names: Vec<&String> = self.defs.keys().collect();
        names.sort();
        for name in names {
            resolver.resolve(name, "registry")?;
        }

        let mut registry = AcousticRegistry::empty();

        for (key, names) in &self.blocks {
            let context = format!("block {}", key.block);
            let acoustics = resolver.mapping(names, &context)?;
            registry.blocks.insert(*key, acoustics);
        }
        for (sound, substrate, names) in &self.primitives {
            let context = format!("primitive {}", sound);
            let acoustics = resolver.mapping(names, &context)?;
            registry.primitives.insert(sound.clone(), substrate.clone(), acoustics);
        }
        for (class, name) in &self.armor {
            let acoustic = resolver.resolve(name, "armor")?;
            registry.armor.insert(*class, acoustic);
        }
        for (class, name) in &self.foot_armor {
            let acoustic = resolver.resolve(name, "foot armor")?;
            registry.foot_armor.insert(*class, acoustic);
        }

        registry.acoustics = resolver.resolved;
        log::debug!(
            "Acoustic registry built: {} acoustics, {} block entries, {} primitives",
            registry.acoustics.len(),
            registry.blocks.len(),
            registry.primitives.len()
        );
        Ok(registry)
    }
}

/// Разрешение ссылок по именам в граф Arc<Acoustic>
struct DefResolver<'a> {
    defs: &'a HashMap<String, AcousticDef>,
    resolved: HashMap<String, AcousticRef>,
    visiting: HashSet<String>,
}

impl DefResolver<'_> {
    fn mapping(&mut self, names: &[String], context: &str) -> Result<BlockAcoustics, FootfallError> {
        if names.iter().any(|n| n == NOT_EMITTER) {
            return Ok(BlockAcoustics::NotEmitter);
        }
        let acoustics = names
            .iter()
            .map(|name| self.resolve(name, context))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BlockAcoustics::Emitter(acoustics))
    }

    fn resolve(&mut self, name: &str, context: &str) -> Result<AcousticRef, FootfallError> {
        if let Some(acoustic) = self.resolved.get(name) {
            return Ok(Arc::clone(acoustic));
        }
        let defs = self.defs;
        let def = defs.get(name).ok_or_else(|| FootfallError::UnknownAcoustic {
            name: name.to_string(),
            context: context.to_string(),
        })?;
        if !self.visiting.insert(name.to_string()) {
            return Err(FootfallError::CyclicAcoustic(name.to_string()));
        }

        let referrer = format!("acoustic {}", name);
        let kind = match def {
            AcousticDef::Basic { sound, volume, pitch, delay } => AcousticKind::Basic(BasicAcoustic {
                sound: sound.clone(),
                volume: *volume,
                pitch: *pitch,
                delay: *delay,
            }),
            AcousticDef::Events { events } => {
                let mut map = HashMap::with_capacity(events.len());
                for (event, target) in events {
                    map.insert(*event, self.resolve(target, &referrer)?);
                }
                AcousticKind::Events(map)
            }
            AcousticDef::Simultaneous { parts } => AcousticKind::Simultaneous(
                parts
                    .iter()
                    .map(|part| self.resolve(part, &referrer))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            AcousticDef::Probability { entries } => AcousticKind::Probability(
                entries
                    .iter()
                    .map(|(weight, target)| Ok((*weight, self.resolve(target, &referrer)?)))
                    .collect::<Result<Vec<_>, FootfallError>>()?,
            ),
        };

        self.visiting.remove(name);
        let acoustic = Arc::new(Acoustic::new(name, kind));
        self.resolved.insert(name.to_string(), Arc::clone(&acoustic));
        Ok(acoustic)
    }
}
