//! Tic-tac-toe driven by rules, a reactive board and events.
//!
//! Every write to the board relation re-checks the `Win` rule for both
//! sides and fires `Win` when one holds. Turns are events that hand play
//! to the `Opponent` of the current side. Moves are scripted instead of
//! read from input.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use elysium::{
    Action, EntityAllocator, EntityId, PatternSpec, Relation, Result, RuleEngine, Value,
};

type Cell2 = (u8, u8);

const LINES: [[Cell2; 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

struct Game {
    engine: Rc<RuleEngine>,
    board: Rc<Relation<Cell2, EntityId>>,
    moves: Rc<RefCell<VecDeque<Cell2>>>,
    winner: Rc<Cell<Option<EntityId>>>,
    rejected: Rc<Cell<u32>>,
    blank: EntityId,
    x: EntityId,
    o: EntityId,
}

fn entity_arg(args: &[Value]) -> EntityId {
    args.first().and_then(Value::as_entity).unwrap_or(EntityId(u32::MAX))
}

fn new_game(moves: &[Cell2]) -> Game {
    let mut entities = EntityAllocator::new();
    let blank = entities.alloc();
    let x = entities.alloc();
    let o = entities.alloc();

    let engine = Rc::new(RuleEngine::new());
    let board: Rc<Relation<Cell2, EntityId>> = Rc::new(
        (0..3u8)
            .flat_map(|row| (0..3u8).map(move |col| ((row, col), blank)))
            .collect(),
    );

    engine.add_rule("Side", PatternSpec::Wildcard, false);
    engine.add_rule("Side", x, true);
    engine.add_rule("Side", o, true);

    engine.add_rule("Opponent", x, o);
    engine.add_rule("Opponent", o, x);

    let cells = Rc::clone(&board);
    engine.add_rule("Win", PatternSpec::Wildcard, false);
    engine.add_rule(
        "Win",
        PatternSpec::rule("Side"),
        Action::with_engine(move |_engine, args| {
            let side = args[0];
            for line in &LINES {
                let mut owned = true;
                for cell in line {
                    if cells.get(cell)? != side {
                        owned = false;
                        break;
                    }
                }
                if owned {
                    return Ok(Value::Bool(true));
                }
            }
            Ok(Value::Bool(false))
        }),
    );

    let weak: Weak<RuleEngine> = Rc::downgrade(&engine);
    board.on_change(move |_board| {
        let Some(engine) = weak.upgrade() else {
            return Ok(());
        };
        for side in [x, o] {
            if engine.check("Win", &[side])? {
                engine.dispatch("Win", &[Value::Entity(side)])?;
            }
        }
        Ok(())
    });

    let winner = Rc::new(Cell::new(None));
    let slot = Rc::clone(&winner);
    engine.handle("Win", move |_engine, args| {
        if slot.get().is_none() {
            slot.set(Some(entity_arg(args)));
        }
        Ok(())
    });

    let moves = Rc::new(RefCell::new(moves.iter().copied().collect::<VecDeque<_>>()));
    let rejected = Rc::new(Cell::new(0));
    {
        let board = Rc::clone(&board);
        let moves = Rc::clone(&moves);
        let winner = Rc::clone(&winner);
        let rejected = Rc::clone(&rejected);
        engine.handle("Turn", move |engine, args| -> Result<()> {
            if winner.get().is_some() {
                return Ok(());
            }
            let Some(cell) = moves.borrow_mut().pop_front() else {
                return Ok(());
            };

            let side = entity_arg(args);
            if board.contains_key(&cell) && board.get(&cell)? == blank {
                board.set(cell, side)?;
            } else {
                rejected.set(rejected.get() + 1);
            }

            let next = engine.apply_rule("Opponent", &[side])?;
            engine.dispatch("Turn", &[next])
        });
    }

    engine.handle("Main", move |engine, _args| {
        engine.dispatch("Turn", &[Value::Entity(x)])
    });

    Game {
        engine,
        board,
        moves,
        winner,
        rejected,
        blank,
        x,
        o,
    }
}

#[test]
fn test_x_wins_top_row() {
    let game = new_game(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (2, 2)]);
    game.engine.dispatch("Main", &[]).unwrap();

    assert_eq!(game.winner.get(), Some(game.x));
    assert_eq!(game.board.get(&(0, 2)).unwrap(), game.x);
    // The game stopped before the last scripted move.
    assert_eq!(game.moves.borrow().len(), 1);
    assert_eq!(game.board.get(&(2, 2)).unwrap(), game.blank);
}

#[test]
fn test_o_wins_diagonal() {
    let game = new_game(&[(0, 1), (0, 0), (0, 2), (1, 1), (1, 0), (2, 2)]);
    game.engine.dispatch("Main", &[]).unwrap();

    assert_eq!(game.winner.get(), Some(game.o));
    assert!(game.engine.check("Win", &[game.o]).unwrap());
    assert!(!game.engine.check("Win", &[game.x]).unwrap());
}

#[test]
fn test_draw() {
    let game = new_game(&[
        (0, 0), (0, 1), (0, 2),
        (1, 1), (1, 0), (1, 2),
        (2, 1), (2, 0), (2, 2),
    ]);
    game.engine.dispatch("Main", &[]).unwrap();

    assert_eq!(game.winner.get(), None);
    assert!(game.moves.borrow().is_empty());
    assert!(game
        .board
        .entries()
        .iter()
        .all(|(_, mark)| *mark != game.blank));
}

#[test]
fn test_occupied_cell_forfeits_turn() {
    // O plays onto X's cell and loses the turn; X then completes a column.
    let game = new_game(&[(0, 0), (0, 0), (1, 0), (3, 3), (2, 0)]);
    game.engine.dispatch("Main", &[]).unwrap();

    assert_eq!(game.rejected.get(), 2);
    assert_eq!(game.winner.get(), Some(game.x));
}

#[test]
fn test_board_write_triggers_win_check() {
    let game = new_game(&[]);

    game.board.set((0, 2), game.o).unwrap();
    game.board.set((1, 1), game.o).unwrap();
    assert_eq!(game.winner.get(), None);

    game.board.set((2, 0), game.o).unwrap();
    assert_eq!(game.winner.get(), Some(game.o));
}

#[test]
fn test_blank_is_not_a_side() {
    let game = new_game(&[]);

    // Blank fills every line, but only sides can win.
    assert!(!game.engine.check("Win", &[game.blank]).unwrap());
    assert_eq!(
        game.engine.apply_rule("Opponent", &[game.x]).unwrap(),
        Value::Entity(game.o)
    );
    assert_eq!(game.engine.rule("Side").unwrap().len(), 2);
}

#[test]
fn test_out_of_range_cell_is_missing() {
    let game = new_game(&[]);
    assert!(game.board.get(&(3, 3)).is_err());
}
