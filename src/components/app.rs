use super::{flight_view::FlightView, win_modal::WinModal};
use crate::config::FlightConfig;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| FlightConfig::load());
    // The session keeps its own latch; this only controls visibility.
    let show_modal = use_state(|| false);

    let on_win = {
        let show_modal = show_modal.clone();
        Callback::from(move |_| show_modal.set(true))
    };
    let on_close = {
        let show_modal = show_modal.clone();
        Callback::from(move |_| show_modal.set(false))
    };

    html! {<div style="position:relative; width:100vw; height:100vh;">
        <FlightView config={config.clone()} on_win={on_win} />
        <WinModal
            show={*show_modal}
            image={config.reward_image.clone().map(AttrValue::from)}
            pdf={config.reward_pdf.clone().map(AttrValue::from)}
            on_close={on_close}
        />
    </div>}
}
