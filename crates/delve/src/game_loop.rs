//! # DELVE Game Loop
//!
//! One explicitly owned [`Simulation`] advanced by one call per frame:
//! ```text
//! Frame N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. INPUT                                                            │
//! │    ├─ Clamp delta time                                              │
//! │    ├─ Look / turn                                                   │
//! │    └─ Spell switch, cast on a fresh fire press                      │
//! │                                                                     │
//! │ 2. PLAYER                                                           │
//! │    └─ Walk with axis-separated sliding                              │
//! │                                                                     │
//! │ 3. STREAMING                                                        │
//! │    ├─ Realize the square around the player                          │
//! │    ├─ Release chunks past the margin                                │
//! │    └─ Open a chest if interact was pressed                          │
//! │                                                                     │
//! │ 4. HOSTILES                                                         │
//! │    └─ Pursue or attack; attacks land on the player                  │
//! │                                                                     │
//! │ 5. PROJECTILES                                                      │
//! │    └─ Move, hit (boss first), expire; kills award experience        │
//! │                                                                     │
//! │ 6. RENDER                                                           │
//! │    └─ Advance flash timers; snapshot on demand                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in a tick can fail. Everything random draws from the
//! simulation's own seeded RNG, so a run is reproducible from its config,
//! catalog and input sequence.

use delve_economy::{pick_weighted, roll_loot, EquipSlot, GameCatalog, ObjectKind};
use delve_procedural::{ChunkMesher, ChunkRenderer, WorldManager, WorldStats};
use delve_shared::{SpriteInstance, Vec3};

use crate::config::SimulationConfig;
use crate::events::{EventBus, EventReceiver, EventSender, GameEvent};
use crate::gameplay::chest::{find_openable, Chest, CHEST_SCATTER};
use crate::gameplay::player::MAX_HEALTH_PER_LEVEL;
use crate::gameplay::{Hostile, HostileId, Player, Projectile};
use crate::input::InputIntent;
use crate::physics;
use crate::rng::SimRng;

/// Per-frame report.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Frame number, from 1.
    pub frame: u64,
    /// Delta time actually simulated, after clamping.
    pub delta_time: f32,
    /// Chunks realized this frame.
    pub chunks_realized: usize,
    /// Chunks released this frame.
    pub chunks_released: usize,
    /// Bolts in flight after the frame.
    pub projectiles_alive: usize,
    /// Hostiles not dead after the frame.
    pub hostiles_alive: usize,
    /// Events delivered to the channel this frame.
    pub events_emitted: u32,
}

/// Everything the renderer draws besides the maze.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderSnapshot {
    /// One billboard per hostile, dead ones invisible.
    pub hostiles: Vec<SpriteInstance>,
    /// One billboard per chest.
    pub chests: Vec<SpriteInstance>,
    /// One billboard per bolt.
    pub projectiles: Vec<SpriteInstance>,
    /// Damage overlay is showing.
    pub player_hurt: bool,
}

/// The game state and its tick.
pub struct Simulation<R: ChunkRenderer = ChunkMesher> {
    config: SimulationConfig,
    catalog: GameCatalog,
    world: WorldManager<R>,
    rng: SimRng,
    player: Player,
    /// Boss first, then monsters in spawn order. Index == `HostileId`.
    hostiles: Vec<Hostile>,
    chests: Vec<Chest>,
    projectiles: Vec<Projectile>,
    bus: EventBus,
    events: EventSender,
    /// Someone asked for a receiver. Until then the backlog is discarded.
    subscribed: bool,
    frame: u64,
    /// Simulated seconds since start.
    clock: f64,
    events_this_frame: u32,
}

impl Simulation<ChunkMesher> {
    /// Classic layout, built-in catalog, headless mesher.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(SimulationConfig::default(), GameCatalog::default(), ChunkMesher::new())
    }
}

impl<R: ChunkRenderer> Simulation<R> {
    /// Creates a simulation and places the player, the boss, the monsters
    /// and the chests.
    ///
    /// # Arguments
    ///
    /// * `config` - World seed, RNG seed and spawn layout
    /// * `catalog` - Templates; expected to have passed validation
    /// * `renderer` - Chunk rendering collaborator
    #[must_use]
    pub fn new(config: SimulationConfig, catalog: GameCatalog, renderer: R) -> Self {
        let bus = EventBus::new(config.event_capacity.max(1));
        let events = bus.sender();
        let [px, pz] = config.player_spawn;

        let mut sim = Self {
            world: WorldManager::new(config.world, renderer),
            rng: SimRng::from_seed(config.rng_seed),
            player: Player::new(px, pz),
            hostiles: Vec::with_capacity(config.monster_count + 1),
            chests: Vec::with_capacity(config.chest_count),
            projectiles: Vec::new(),
            bus,
            events,
            subscribed: false,
            frame: 0,
            clock: 0.0,
            events_this_frame: 0,
            config,
            catalog,
        };
        sim.populate();

        tracing::info!(
            world_seed = sim.config.world.seed,
            rng_seed = sim.config.rng_seed,
            hostiles = sim.hostiles.len(),
            chests = sim.chests.len(),
            "simulation ready"
        );
        sim
    }

    fn populate(&mut self) {
        for item in self.catalog.starting_kit() {
            self.player.inventory.add_item(item.clone());
        }

        let [bx, bz] = self.config.boss_spawn;
        let at = self.place(bx, bz);
        let id = self.next_id();
        self.hostiles.push(Hostile::boss(id, &self.catalog.boss, at.x, at.z));

        for i in 0..self.config.monster_count {
            let c = (i * 2 + 5) as f32;
            let template = pick_weighted(&self.catalog.monsters, &mut self.rng)
                .and_then(|t| self.catalog.monster_index(&t.id))
                .unwrap_or(0);
            self.spawn_monster(template, c, c);
        }

        let chest_template = self.catalog.objects.iter().position(|o| o.kind == ObjectKind::Chest);
        if let Some(template) = chest_template {
            for _ in 0..self.config.chest_count {
                let x = (self.rng.unit() - 0.5) * CHEST_SCATTER + bx;
                let z = (self.rng.unit() - 0.5) * CHEST_SCATTER + bz;
                let at = self.place(x, z);
                if let Some(object) = self.catalog.objects.get(template) {
                    self.chests.push(Chest::new(template, object, at.x, at.z));
                }
            }
        }
    }

    /// Floor position for a spawn, moved to an open cell if it's in a wall.
    fn place(&mut self, x: f32, z: f32) -> Vec3 {
        let wanted = Vec3::on_floor(x, z);
        if self.world.is_blocked(wanted) {
            self.world.find_open_cell_near(wanted, &mut self.rng)
        } else {
            wanted
        }
    }

    fn next_id(&self) -> HostileId {
        HostileId(self.hostiles.len() as u32)
    }

    /// Adds a monster at `(x, z)`, relocated out of walls.
    ///
    /// An unknown template index falls back to the first monster.
    ///
    /// # Returns
    ///
    /// The new hostile's id, or `None` if the catalog has no monsters.
    pub fn spawn_monster(&mut self, template: usize, x: f32, z: f32) -> Option<HostileId> {
        let index = if template < self.catalog.monsters.len() { template } else { 0 };
        if self.catalog.monsters.is_empty() {
            return None;
        }
        let at = self.place(x, z);
        let id = self.next_id();
        let monster = Hostile::monster(id, index, &self.catalog.monsters[index], at.x, at.z);
        tracing::debug!(hostile = %id, name = %monster.name, x = at.x, z = at.z, "monster spawned");
        self.hostiles.push(monster);
        Some(id)
    }

    // =========================================================================
    // TICK
    // =========================================================================

    /// Advances the simulation by one frame.
    ///
    /// # Arguments
    ///
    /// * `dt` - Seconds since the previous frame; clamped to
    ///   `[0, max_delta_time]`, non-finite values count as 0
    /// * `input` - This frame's resolved intent
    pub fn tick(&mut self, dt: f32, input: &InputIntent) -> FrameStats {
        let dt = if dt.is_finite() { dt.clamp(0.0, self.config.max_delta_time) } else { 0.0 };
        let input = input.sanitized();
        self.frame += 1;
        self.clock += f64::from(dt);
        self.events_this_frame = 0;

        // 1. Input
        self.process_input(&input, dt);

        // 2. Player
        self.move_player(&input, dt);

        // 3. Streaming + interaction
        let report = self.world.tick(self.player.position);
        if input.interact && !self.player.dead {
            self.interact();
        }

        // 4. Hostiles
        self.update_hostiles(dt);

        // 5. Projectiles
        self.update_projectiles(dt);

        // 6. Render
        self.update_feedback();

        if !self.subscribed {
            self.bus.discard_pending();
        }

        let stats = FrameStats {
            frame: self.frame,
            delta_time: dt,
            chunks_realized: report.realized,
            chunks_released: report.released,
            projectiles_alive: self.projectiles.len(),
            hostiles_alive: self.hostiles.iter().filter(|h| !h.is_dead()).count(),
            events_emitted: self.events_this_frame,
        };
        tracing::trace!(?stats, "frame");
        stats
    }

    fn process_input(&mut self, input: &InputIntent, dt: f32) {
        self.player.spells.tick(dt);
        if self.player.dead {
            self.player.spells.trigger(false);
            return;
        }

        self.player.look(input.look_x, input.look_y);
        self.player.turn(input.turn, dt);

        if input.switch_spell != 0 {
            self.switch_spell(input.switch_spell);
        }
        if self.player.spells.trigger(input.fire) {
            self.cast();
        }
    }

    fn move_player(&mut self, input: &InputIntent, dt: f32) {
        if self.player.dead || !input.is_moving() {
            return;
        }
        let delta = self.player.walk_delta(input.forward, input.strafe, dt);
        self.player.position = physics::slide_move(&mut self.world, self.player.position, delta).position;
    }

    fn cast(&mut self) {
        let index = self.player.spells.selected();
        let Some(spell) = self.catalog.spell_or_first(index) else {
            return;
        };

        let bolt = Projectile::cast(self.player.position, self.player.view_direction(), index, spell);
        let cooldown = spell.cooldown;
        let spell_id = spell.id.clone();

        self.player.spells.start_cooldown(cooldown);
        self.emit(GameEvent::ProjectileFired {
            spell_id,
            position: bolt.position.to_array(),
            damage: bolt.damage,
        });
        self.projectiles.push(bolt);
    }

    fn update_hostiles(&mut self, dt: f32) {
        if self.player.dead {
            return;
        }

        let target = self.player.position;
        let mut landed = Vec::new();
        for hostile in &mut self.hostiles {
            if let Some(damage) = hostile.update(dt, &mut self.world, target, &mut self.rng) {
                landed.push((hostile.id, damage));
            }
        }

        for (attacker, damage) in landed {
            if self.player.dead {
                break;
            }
            self.damage_player(attacker, damage);
        }
    }

    fn damage_player(&mut self, attacker: HostileId, damage: u32) {
        let died = self.player.take_damage(damage, self.clock);
        tracing::debug!(%attacker, damage, health = self.player.health, "player hit");
        self.emit(GameEvent::PlayerDamaged {
            attacker,
            damage,
            health_remaining: self.player.health,
        });
        if died {
            tracing::info!(%attacker, level = self.player.level, "player died");
            self.emit(GameEvent::PlayerDied);
        }
    }

    fn update_projectiles(&mut self, dt: f32) {
        let mut projectiles = std::mem::take(&mut self.projectiles);
        projectiles.retain_mut(|bolt| {
            bolt.advance(dt);
            if let Some(target) = bolt.find_target(&self.hostiles) {
                self.resolve_hit(target, bolt.damage);
                return false;
            }
            !bolt.expired()
        });
        self.projectiles = projectiles;
    }

    fn resolve_hit(&mut self, index: usize, damage: u32) {
        let now = self.clock;
        let Some(hostile) = self.hostiles.get_mut(index) else {
            return;
        };

        let killed = hostile.apply_damage(damage, now);
        let (id, kind, health, max_health) = (hostile.id, hostile.kind, hostile.health, hostile.max_health);
        let name = killed.then(|| hostile.name.clone());

        self.emit(GameEvent::HostileHit {
            hostile: id,
            damage,
            health_remaining: health,
            max_health,
        });

        if let Some(name) = name {
            let experience = kind.kill_experience(&mut self.rng);
            tracing::info!(hostile = %id, name = %name, experience, "hostile killed");
            self.emit(GameEvent::HostileKilled {
                hostile: id,
                name,
                experience,
            });
            self.award_experience(experience);
        }
    }

    fn update_feedback(&mut self) {
        let now = self.clock;
        self.player.feedback.update(now);
        for hostile in &mut self.hostiles {
            hostile.feedback.update(now);
        }
    }

    fn emit(&mut self, event: GameEvent) {
        if self.events.send(event) {
            self.events_this_frame += 1;
        }
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    /// Moves the spell selection by `step`, wrapping around.
    ///
    /// # Returns
    ///
    /// The new spell index.
    pub fn switch_spell(&mut self, step: i32) -> usize {
        let index = self.player.spells.cycle(step, self.catalog.spells.len());
        if let Some(spell) = self.catalog.spells.get(index) {
            let spell_id = spell.id.clone();
            self.emit(GameEvent::SpellSwitched { index, spell_id });
        }
        index
    }

    /// Opens the first unopened chest in reach and grants its loot.
    ///
    /// # Returns
    ///
    /// Index of the opened chest, or `None` if none was in reach.
    pub fn interact(&mut self) -> Option<usize> {
        let index = find_openable(&self.chests, self.player.position)?;
        let chest = self.chests.get_mut(index)?;
        chest.open = true;
        let (position, template) = (chest.position, chest.template);

        tracing::info!(chest = index, "chest opened");
        self.emit(GameEvent::ChestOpened {
            chest: index,
            position: position.to_array(),
        });

        let loot = self
            .catalog
            .objects
            .get(template)
            .and_then(|object| roll_loot(&self.catalog, object, &mut self.rng))
            .cloned();

        if let Some(item) = loot {
            let (item_id, name) = (item.id.clone(), item.name.clone());
            if self.player.inventory.add_item(item) {
                self.emit(GameEvent::ItemLooted { item_id, name });
            } else {
                tracing::debug!(item = %item_id, "inventory full, loot lost");
                self.emit(GameEvent::InventoryFull { item_id });
            }
        }

        Some(index)
    }

    /// Equips the inventory item at `index` into `slot`.
    ///
    /// # Returns
    ///
    /// `false` (and no change) for an out-of-range index.
    pub fn equip(&mut self, index: usize, slot: EquipSlot) -> bool {
        if !self.player.inventory.equip(index, slot) {
            return false;
        }
        if let Some(item) = self.player.inventory.equipped(slot) {
            let item_id = item.id.clone();
            self.emit(GameEvent::ItemEquipped { item_id, slot });
        }
        true
    }

    /// Grants experience, emitting one `LevelUp` per level gained.
    pub fn award_experience(&mut self, amount: u32) {
        let gained = self.player.gain_experience(amount);
        let top = self.player.level;
        for level in (top + 1 - gained)..=top {
            let max_health = self.player.max_health - MAX_HEALTH_PER_LEVEL * (top - level);
            tracing::info!(level, max_health, "level up");
            self.emit(GameEvent::LevelUp { level, max_health });
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Sprites for the renderer.
    #[must_use]
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            hostiles: self.hostiles.iter().map(Hostile::sprite).collect(),
            chests: self.chests.iter().map(Chest::sprite).collect(),
            projectiles: self.projectiles.iter().map(Projectile::sprite).collect(),
            player_hurt: self.player.is_hurt(),
        }
    }

    /// World cells of every wall within `radius_chunks` of the player.
    pub fn minimap_walls(&mut self, radius_chunks: u32) -> Vec<(i32, i32)> {
        self.world.wall_cells_near(self.player.position, radius_chunks)
    }

    /// A receiver for the event stream.
    ///
    /// Events sent before the first call are not delivered. Every receiver
    /// shares one queue, so each event goes to exactly one of them.
    #[must_use]
    pub fn events(&mut self) -> EventReceiver {
        if !self.subscribed {
            self.bus.discard_pending();
            self.subscribed = true;
        }
        self.bus.receiver()
    }

    /// Run settings.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Game data.
    #[must_use]
    pub const fn catalog(&self) -> &GameCatalog {
        &self.catalog
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player, for drivers and tests that teleport or script state.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// All hostiles, boss first.
    #[must_use]
    pub fn hostiles(&self) -> &[Hostile] {
        &self.hostiles
    }

    /// A hostile by id.
    #[must_use]
    pub fn hostile(&self, id: HostileId) -> Option<&Hostile> {
        self.hostiles.get(id.0 as usize)
    }

    /// Mutable hostile by id.
    pub fn hostile_mut(&mut self, id: HostileId) -> Option<&mut Hostile> {
        self.hostiles.get_mut(id.0 as usize)
    }

    /// The boss, if one was spawned.
    #[must_use]
    pub fn boss(&self) -> Option<&Hostile> {
        self.hostiles.iter().find(|h| h.kind.is_boss())
    }

    /// All chests.
    #[must_use]
    pub fn chests(&self) -> &[Chest] {
        &self.chests
    }

    /// Bolts in flight.
    #[must_use]
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// The world.
    #[must_use]
    pub const fn world(&self) -> &WorldManager<R> {
        &self.world
    }

    /// Mutable world, for terrain queries.
    pub fn world_mut(&mut self) -> &mut WorldManager<R> {
        &mut self.world
    }

    /// World counters.
    #[must_use]
    pub fn world_stats(&self) -> WorldStats {
        self.world.stats()
    }

    /// Frames simulated so far.
    #[inline]
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated seconds so far.
    #[inline]
    #[must_use]
    pub const fn clock(&self) -> f64 {
        self.clock
    }
}
