use engine::graphics::{DrawCmd, DrawList, Renderer2d};
use engine::surface::SurfaceSize;
use game::piece::PieceKind;
use game::render::{BACKGROUND, FIELD_CELL, FieldLayout, draw_session};
use game::session::{GameSession, SessionConfig};

const CELL: u32 = 20;

fn frame_for(session: &GameSession) -> DrawList {
    let mut gfx = DrawList::new(SurfaceSize::new(640, 480));
    gfx.begin_frame(SurfaceSize::new(640, 480));
    draw_session(&mut gfx, session, CELL);
    gfx
}

#[test]
fn frame_starts_with_a_single_clear() {
    let session = GameSession::new(SessionConfig::default());
    let gfx = frame_for(&session);
    assert_eq!(gfx.commands()[0], DrawCmd::Clear(BACKGROUND));
    assert_eq!(
        gfx.commands()
            .iter()
            .filter(|c| matches!(c, DrawCmd::Clear(_)))
            .count(),
        1
    );
}

#[test]
fn draw_calls_cover_background_locked_and_piece_cells() {
    let mut session = GameSession::new(SessionConfig::default());
    session.spawn_kind(PieceKind::Box);
    session.hard_drop();
    session.spawn_kind(PieceKind::T);

    let gfx = frame_for(&session);
    let rects: Vec<_> = gfx.rects().collect();
    let backgrounds = rects.iter().filter(|(_, c)| *c == FIELD_CELL).count();
    let locked = rects
        .iter()
        .filter(|(_, c)| *c == PieceKind::Box.color())
        .count();
    let active = rects
        .iter()
        .filter(|(_, c)| *c == PieceKind::T.color())
        .count();

    assert_eq!(backgrounds, 200);
    assert_eq!(locked, 4);
    assert_eq!(active, 4);
    assert_eq!(rects.len(), 208);
}

#[test]
fn locked_cell_is_drawn_over_its_background() {
    let mut session = GameSession::new(SessionConfig::default());
    session.spawn_kind(PieceKind::Box);
    session.hard_drop();

    let gfx = frame_for(&session);
    let layout = FieldLayout::centered(SurfaceSize::new(640, 480), 10, 20, CELL);
    let target = layout.cell_rect(4, 19);
    let at_target: Vec<_> = gfx.rects().filter(|(r, _)| *r == target).collect();
    assert_eq!(at_target.len(), 2);
    assert_eq!(at_target[0].1, FIELD_CELL);
    assert_eq!(at_target[1].1, PieceKind::Box.color());
}

#[test]
fn hud_shows_line_counter() {
    let mut session = GameSession::new(SessionConfig::default());
    for x in (0..10).filter(|&x| x != 0) {
        session.field_mut().set_cell(x, 19, [9, 9, 9, 255]);
    }
    session.spawn_kind(PieceKind::Stick);
    let piece = *session.piece();
    session.set_active_piece(piece, 0, -4);
    session.hard_drop();

    let gfx = frame_for(&session);
    assert_eq!(gfx.texts().collect::<Vec<_>>(), vec!["LINES 1"]);
}
