use mines_core::{CellView, SessionState, Snapshot, Transition};
use mines_protocol::Response;

fn cell_glyph(cell: CellView) -> char {
    match cell {
        CellView::Hidden => '#',
        CellView::Revealed(0) => '.',
        CellView::Revealed(count) => char::from(b'0' + count),
        CellView::Hazard => '*',
    }
}

pub fn board(snapshot: &Snapshot) -> String {
    let mut out = String::from("    ");
    for col in 0..snapshot.cols {
        out.push_str(&format!("{col:>3}"));
    }
    out.push('\n');

    for (row, cells) in snapshot.cells.rows().into_iter().enumerate() {
        out.push_str(&format!("{row:>3} "));
        for &cell in cells {
            out.push_str(&format!("{:>3}", cell_glyph(cell)));
        }
        out.push('\n');
    }

    let status = match snapshot.state {
        SessionState::Ready | SessionState::Active => "in progress",
        SessionState::Won => "cleared",
        SessionState::Lost => "exploded",
    };
    out.push_str(&format!(
        "{} mines, {} cells open, {}",
        snapshot.hazard_count, snapshot.revealed_count, status
    ));
    out
}

fn transition_line(transition: Transition) -> &'static str {
    match transition {
        Transition::AlreadyTerminal => "That game is already over.",
        Transition::AlreadyRevealed => "That cell is already open.",
        Transition::HitHazard => "Boom! You hit a mine.",
        Transition::SafeReveal => "Safe.",
        Transition::Victory => "You cleared the board!",
    }
}

pub fn response(response: &Response) -> String {
    match response {
        Response::Game {
            transition,
            snapshot,
        } => match transition {
            Some(transition) => format!("{}\n{}", transition_line(*transition), board(snapshot)),
            None => board(snapshot),
        },
        Response::Stats { player, stats } => {
            let rate = stats
                .win_rate()
                .map(|rate| format!("{:.0}%", rate * 100.0))
                .unwrap_or_else(|| "-".to_owned());
            format!(
                "{}: {} played, {} won, {} lost ({} win rate), {} cells opened",
                player, stats.games_played, stats.wins, stats.losses, rate, stats.cells_revealed_total
            )
        }
        Response::Abandoned {
            player,
            had_session: true,
        } => format!("{player} abandoned their game."),
        Response::Abandoned {
            player,
            had_session: false,
        } => format!("{player} has no game to abandon."),
        Response::Error { message, .. } => format!("error: {message}"),
    }
}
