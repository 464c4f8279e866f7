use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct WinModalProps {
    pub show: bool,
    #[prop_or_default]
    pub image: Option<AttrValue>,
    #[prop_or_default]
    pub pdf: Option<AttrValue>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn WinModal(props: &WinModalProps) -> Html {
    if !props.show {
        return html! {};
    }
    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let image = props.image.as_ref().map(|src| {
        html! { <img src={src.clone()} alt="reward" style="max-width:100%; max-height:50vh; border-radius:8px; margin:8px 0;" /> }
    });
    let pdf = props.pdf.as_ref().map(|href| {
        html! { <a href={href.clone()} target="_blank" rel="noopener" style="color:#58a6ff;">{"Open PDF"}</a> }
    });
    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:2000;">
        <div style="background:#161b22; color:#e6edf3; border:2px solid #2ea043; border-radius:12px; padding:20px 28px; max-width:90vw; text-align:center; display:flex; flex-direction:column; gap:10px; align-items:center;">
            <h2 style="margin:0; color:#2ea043;">{"Congratulations!"}</h2>
            <p style="margin:0;">{"You reached the destination."}</p>
            { for image }
            { for pdf }
            <button onclick={close_cb} style="margin-top:8px; padding:6px 16px;">{"Close"}</button>
        </div>
    </div>}
}
