use estopim_protocol::{
    apply_changes, Cell, CellCount, Coord, Coord2, EndType, Grid, GridChanges, StateUpdate,
};
use yew::prelude::*;

use crate::bridge::{GridChangeSubscriber, StateBridge};
use crate::screen::Screen;
use crate::service::ServiceHandle;

/// Board shape the start prompt requests, matching the service defaults.
const START_WIDTH: Coord = 40;
const START_HEIGHT: Coord = 40;
const START_MINES: CellCount = 160;

fn begin_game(service: &ServiceHandle) {
    log::debug!(
        "init game: {}x{}, {} mines",
        START_WIDTH,
        START_HEIGHT,
        START_MINES
    );
    service.init_game(START_WIDTH, START_HEIGHT, START_MINES);
}

fn restart_game(service: &ServiceHandle) {
    log::debug!("restart requested");
    service.reset();
}

#[derive(Properties, Clone, PartialEq)]
pub struct BridgeProps {
    pub service: ServiceHandle,
}

pub enum BridgeMsg {
    Update(StateUpdate),
}

/// Root component: holds the bridge and projects the latest state onto one of
/// the screen variants. Unmounting drops the bridge, which tears down the
/// remote subscription and the listener set with it.
pub struct BridgeView {
    bridge: StateBridge,
}

impl Component for BridgeView {
    type Message = BridgeMsg;
    type Properties = BridgeProps;

    fn create(ctx: &Context<Self>) -> Self {
        let bridge = StateBridge::connect(
            &*ctx.props().service,
            ctx.link().callback(BridgeMsg::Update),
        );
        Self { bridge }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            BridgeMsg::Update(update) => {
                self.bridge.apply(update);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let service = ctx.props().service.clone();

        match Screen::from_state(self.bridge.state()) {
            Screen::Empty => html! { <div class="estopim" /> },
            Screen::Start => {
                let on_start = Callback::from(move |_: MouseEvent| begin_game(&service));
                html! {
                    <div class="estopim">
                        <StartView {on_start} />
                    </div>
                }
            }
            Screen::Board { grid } => html! {
                <div class="estopim">
                    <BoardView
                        grid={grid.clone()}
                        changes={self.bridge.subscriber()}
                        {service}
                    />
                </div>
            },
            Screen::End { end_type } => {
                let on_restart = Callback::from(move |_: MouseEvent| restart_game(&service));
                html! {
                    <div class="estopim">
                        <EndView {end_type} {on_restart} />
                    </div>
                }
            }
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
struct StartProps {
    on_start: Callback<MouseEvent>,
}

#[function_component(StartView)]
fn start_view(props: &StartProps) -> Html {
    html! {
        <button class="start" onclick={props.on_start.clone()}>
            {"Let’s play!"}
        </button>
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum CellAction {
    Reveal(Coord2),
    ToggleFlag(Coord2),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    x: Coord,
    y: Coord,
    cell: Cell,
    callback: Callback<CellAction>,
}

fn cell_classes(cell: Cell) -> Classes {
    let mut class = classes!("cell");
    if cell.flagged {
        class.push("flag");
    } else if cell.revealed {
        class.push("open");
        if cell.has_mine {
            class.push("mine");
        } else {
            class.push(format!("num-{}", cell.touching_mines));
        }
    }
    class
}

#[function_component(CellView)]
fn cell_view(props: &CellProps) -> Html {
    let CellProps {
        x,
        y,
        cell,
        callback,
    } = props.clone();

    let class = cell_classes(cell);

    let onclick = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            log::trace!("({}, {}) click", x, y);
            callback.emit(CellAction::Reveal((x, y)));
        })
    };

    let oncontextmenu = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        log::trace!("({}, {}) context menu", x, y);
        callback.emit(CellAction::ToggleFlag((x, y)));
    });

    html! {
        <td {class} {onclick} {oncontextmenu} />
    }
}

#[derive(Properties, Clone, PartialEq)]
struct BoardProps {
    grid: Grid,
    changes: GridChangeSubscriber,
    service: ServiceHandle,
}

enum BoardMsg {
    Changes(GridChanges),
    Cell(CellAction),
}

/// Board screen. Keeps its own grid copy fed by the change side channel, so
/// cell updates land without waiting for a full state re-render from above.
struct BoardView {
    grid: Grid,
    listener: Callback<GridChanges>,
}

impl Component for BoardView {
    type Message = BoardMsg;
    type Properties = BoardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let listener = ctx.link().callback(BoardMsg::Changes);
        ctx.props().changes.register(listener.clone());
        Self {
            grid: ctx.props().grid.clone(),
            listener,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().changes != old_props.changes {
            old_props.changes.unregister(&self.listener);
            ctx.props().changes.register(self.listener.clone());
        }
        self.grid = ctx.props().grid.clone();
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            BoardMsg::Changes(changes) => {
                log::trace!("{} cell changes", changes.len());
                match apply_changes(&mut self.grid, &changes) {
                    Ok(()) => true,
                    Err(err) => {
                        log::warn!("dropping change batch: {}", err);
                        false
                    }
                }
            }
            BoardMsg::Cell(CellAction::Reveal(coords)) => {
                log::debug!("reveal cell: {:?}", coords);
                ctx.props().service.reveal(coords);
                false
            }
            BoardMsg::Cell(CellAction::ToggleFlag(coords)) => {
                log::debug!("toggle flag: {:?}", coords);
                ctx.props().service.toggle_flag(coords);
                false
            }
        }
    }

    fn destroy(&mut self, ctx: &Context<Self>) {
        ctx.props().changes.unregister(&self.listener);
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let (cols, rows) = self.grid.dim();
        let callback = ctx.link().callback(BoardMsg::Cell);

        html! {
            <table class="board">
                {
                    for (0..rows).map(|y| html! {
                        <tr>
                            {
                                for (0..cols).map(|x| {
                                    let cell = self.grid[[x, y]];
                                    let callback = callback.clone();
                                    html! {
                                        <CellView
                                            x={x as Coord}
                                            y={y as Coord}
                                            {cell}
                                            {callback}
                                        />
                                    }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
struct EndProps {
    end_type: EndType,
    on_restart: Callback<MouseEvent>,
}

#[function_component(EndView)]
fn end_view(props: &EndProps) -> Html {
    let message = match props.end_type {
        EndType::Win => "You win!",
        EndType::Lose => "Game over",
    };

    html! {
        <div class="end">
            <p>{message}</p>
            <button onclick={props.on_restart.clone()}>{"Play again"}</button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakeService, ServiceCall};
    use std::rc::Rc;

    #[test]
    fn start_prompt_requests_the_fixed_board() {
        let service = FakeService::default();
        let handle = ServiceHandle::new(Rc::new(service.clone()));

        begin_game(&handle);

        assert_eq!(service.calls(), vec![ServiceCall::InitGame(40, 40, 160)]);
    }

    #[test]
    fn restart_invokes_the_reset_operation() {
        let service = FakeService::default();
        let handle = ServiceHandle::new(Rc::new(service.clone()));

        restart_game(&handle);

        assert_eq!(service.calls(), vec![ServiceCall::Reset]);
    }

    #[test]
    fn hidden_cells_render_bare() {
        assert_eq!(cell_classes(Cell::default()), classes!("cell"));
    }

    #[test]
    fn revealed_cells_carry_their_mine_count() {
        let cell = Cell {
            revealed: true,
            touching_mines: 3,
            ..Cell::default()
        };
        assert_eq!(cell_classes(cell), classes!("cell", "open", "num-3"));
    }

    #[test]
    fn revealed_mines_and_flags_get_their_own_look() {
        let mine = Cell {
            revealed: true,
            has_mine: true,
            ..Cell::default()
        };
        assert_eq!(cell_classes(mine), classes!("cell", "open", "mine"));

        let flagged = Cell {
            flagged: true,
            revealed: true,
            ..Cell::default()
        };
        assert_eq!(cell_classes(flagged), classes!("cell", "flag"));
    }
}
