//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! value.  Side effects are limited to the injected RNG, so tests can
//! drive everything with a seeded `StdRng`.

use rand::Rng;

use crate::consts::{
    BEAM_HEIGHT, BEAM_WIDTH, BOMB_COLOR, BOMB_RADIUS, EXPLOSION_LIFE, EXPLOSION_SIZE, FIELD_HEIGHT,
    FIELD_WIDTH, NUM_BOMBS, PLAYER_SIZE, PLAYER_START, SCORE_PER_BOMB, SPAWN_MARGIN, STEP,
};
use crate::entities::{
    Beam, Bomb, Explosion, GameState, GameStatus, Player, PlayerVisual, PressedKeys, Rect,
};

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Per-axis containment test against the fixed playfield.
///
/// Returns (horizontally inside, vertically inside): the left edge must
/// be ≥ 0 and the right edge ≤ `FIELD_WIDTH`, likewise top and bottom
/// against `FIELD_HEIGHT`.  The two axes are independent.
pub fn check_bound(rect: &Rect) -> (bool, bool) {
    let horiz = rect.left() >= 0 && rect.right() <= FIELD_WIDTH;
    let vert = rect.top() >= 0 && rect.bottom() <= FIELD_HEIGHT;
    (horiz, vert)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial session state: player centered at `PLAYER_START`
/// facing right, `NUM_BOMBS` bombs scattered inside the spawn margin,
/// nothing else on the field.
pub fn init_state(rng: &mut impl Rng) -> GameState {
    let (cx, cy) = PLAYER_START;
    GameState {
        player: Player {
            rect: Rect::from_center(cx, cy, PLAYER_SIZE, PLAYER_SIZE),
            facing: (STEP, 0),
            visual: PlayerVisual::Normal,
        },
        bombs: (0..NUM_BOMBS).map(|_| spawn_bomb(rng)).collect(),
        beams: Vec::new(),
        explosions: Vec::new(),
        score: 0,
        status: GameStatus::Running,
        frame: 0,
    }
}

/// One bomb at a uniformly random position inside the margin-inset
/// playfield, each velocity component an independent coin flip between
/// the two diagonal speeds.
pub fn spawn_bomb(rng: &mut impl Rng) -> Bomb {
    let cx = rng.gen_range(SPAWN_MARGIN..=FIELD_WIDTH - SPAWN_MARGIN);
    let cy = rng.gen_range(SPAWN_MARGIN..=FIELD_HEIGHT - SPAWN_MARGIN);
    let vx = if rng.gen_bool(0.5) { STEP } else { -STEP };
    let vy = if rng.gen_bool(0.5) { STEP } else { -STEP };
    Bomb {
        rect: Rect::from_center(cx, cy, 2 * BOMB_RADIUS, 2 * BOMB_RADIUS),
        radius: BOMB_RADIUS,
        vx,
        vy,
        color: BOMB_COLOR,
    }
}

// ── Input-driven state transitions (pure) ────────────────────────────────────

/// Append one beam bound to the player's current position: vertical
/// center on the player's vertical center, left edge on the player's
/// right edge, moving rightward.
pub fn fire_beam(state: &GameState) -> GameState {
    let (_, py) = state.player.rect.center();
    let beam = Beam {
        rect: Rect::new(
            state.player.rect.right(),
            py - BEAM_HEIGHT / 2,
            BEAM_WIDTH,
            BEAM_HEIGHT,
        ),
        vx: STEP,
        vy: 0,
    };
    let mut beams = state.beams.clone();
    beams.push(beam);
    GameState {
        beams,
        ..state.clone()
    }
}

/// Swap the player's active sprite variant; position and facing are
/// untouched.
pub fn change_visual(player: &Player, visual: PlayerVisual) -> Player {
    Player {
        visual,
        ..player.clone()
    }
}

/// Move the player by the sum of all pressed direction keys.
///
/// Opposing keys cancel and diagonals combine.  If the summed move would
/// leave the playfield on either axis the whole displacement is
/// reverted, never clamped per axis.  A nonzero net move sets the facing
/// vector to that exact displacement and drops any scoring flash back to
/// the normal sprite; a frame with no net movement retains both.
pub fn move_player(player: &Player, pressed: &PressedKeys) -> Player {
    let mut dx = 0;
    let mut dy = 0;
    if pressed.up {
        dy -= STEP;
    }
    if pressed.down {
        dy += STEP;
    }
    if pressed.left {
        dx -= STEP;
    }
    if pressed.right {
        dx += STEP;
    }

    let moved = player.rect.shifted(dx, dy);
    let rect = if check_bound(&moved) == (true, true) {
        moved
    } else {
        player.rect
    };

    if rect != player.rect {
        Player {
            rect,
            facing: (dx, dy),
            visual: PlayerVisual::Normal,
        }
    } else {
        Player {
            rect,
            ..player.clone()
        }
    }
}

// ── Per-entity updates ───────────────────────────────────────────────────────

/// Advance a beam by its velocity while it is still fully inside the
/// playfield; once outside it freezes in place until the prune pass
/// drops it.
pub fn update_beam(beam: &Beam) -> Beam {
    if check_bound(&beam.rect) == (true, true) {
        Beam {
            rect: beam.rect.shifted(beam.vx, beam.vy),
            ..beam.clone()
        }
    } else {
        beam.clone()
    }
}

/// Bounce, then move: invert the velocity on any axis whose bounds check
/// fails, then advance by the (possibly just-flipped) velocity.  The
/// flip must happen before the displacement is applied.
pub fn update_bomb(bomb: &Bomb) -> Bomb {
    let (horiz, vert) = check_bound(&bomb.rect);
    let vx = if horiz { bomb.vx } else { -bomb.vx };
    let vy = if vert { bomb.vy } else { -bomb.vy };
    Bomb {
        rect: bomb.rect.shifted(vx, vy),
        vx,
        vy,
        ..bomb.clone()
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one tick.
///
/// The order is contractual: the player/bomb check runs first and ends
/// the session before anything else mutates; beam/bomb pairing follows,
/// then movement and lifecycle pruning.  A finished session passes
/// through unchanged.
pub fn tick(state: &GameState, pressed: &PressedKeys) -> GameState {
    if state.status != GameStatus::Running {
        return state.clone();
    }

    // ── 1. Player vs bombs: first contact ends the session ────────────────────
    if state
        .bombs
        .iter()
        .any(|b| b.rect.overlaps(&state.player.rect))
    {
        return GameState {
            player: change_visual(&state.player, PlayerVisual::Defeated),
            status: GameStatus::GameOver,
            ..state.clone()
        };
    }

    // ── 2. Beams vs bombs: first match per bomb wins ──────────────────────────
    // Outer loop over bombs, inner over beams.  A beam that destroys a
    // bomb is consumed and cannot destroy a second one this tick; both
    // sides are tracked in explicit index sets checked before matching.
    let mut destroyed_bombs: Vec<usize> = Vec::new();
    let mut consumed_beams: Vec<usize> = Vec::new();
    let mut explosions = state.explosions.clone();

    for (bi, bomb) in state.bombs.iter().enumerate() {
        for (mi, beam) in state.beams.iter().enumerate() {
            if destroyed_bombs.contains(&bi) || consumed_beams.contains(&mi) {
                continue;
            }
            if beam.rect.overlaps(&bomb.rect) {
                destroyed_bombs.push(bi);
                consumed_beams.push(mi);
                let (cx, cy) = bomb.rect.center();
                explosions.push(Explosion {
                    rect: Rect::from_center(cx, cy, EXPLOSION_SIZE, EXPLOSION_SIZE),
                    life: EXPLOSION_LIFE,
                });
                break;
            }
        }
    }

    let score = state.score + destroyed_bombs.len() as u32 * SCORE_PER_BOMB;
    let scored = !destroyed_bombs.is_empty();

    let bombs: Vec<Bomb> = state
        .bombs
        .iter()
        .enumerate()
        .filter(|(i, _)| !destroyed_bombs.contains(i))
        .map(|(_, b)| b.clone())
        .collect();

    let beams: Vec<Beam> = state
        .beams
        .iter()
        .enumerate()
        .filter(|(i, _)| !consumed_beams.contains(i))
        .map(|(_, b)| b.clone())
        .collect();

    // ── 3. Player movement ────────────────────────────────────────────────────
    let player = {
        let base = if scored {
            change_visual(&state.player, PlayerVisual::Scoring)
        } else {
            state.player.clone()
        };
        move_player(&base, pressed)
    };

    // ── 4. Beams advance, then out-of-bounds ones drop out ────────────────────
    let beams: Vec<Beam> = beams
        .iter()
        .map(update_beam)
        .filter(|b| check_bound(&b.rect) == (true, true))
        .collect();

    // ── 5. Explosions: expired ones out first, survivors burn down ────────────
    let explosions: Vec<Explosion> = explosions
        .iter()
        .filter(|e| e.life > 0)
        .map(|e| Explosion {
            life: e.life - 1,
            ..e.clone()
        })
        .collect();

    // ── 6. Bombs bounce and move ──────────────────────────────────────────────
    let bombs: Vec<Bomb> = bombs.iter().map(update_bomb).collect();

    GameState {
        player,
        bombs,
        beams,
        explosions,
        score,
        status: GameStatus::Running,
        frame: state.frame + 1,
    }
}
