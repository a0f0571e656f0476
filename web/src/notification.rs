use huematch_core::{Notification, NotificationKind};
use yew::prelude::*;

use crate::utils::Modal;

#[derive(Properties, PartialEq)]
pub(crate) struct NotificationProps {
    pub notification: Option<Notification>,
    pub ondismiss: Callback<()>,
}

const fn popup_class(kind: NotificationKind) -> &'static str {
    use NotificationKind::*;
    match kind {
        Locked => "locked-popup",
        Win => "success-popup",
        Lose => "error-popup",
        Timeout => "time-popup",
        CampaignComplete => "complete-popup",
    }
}

#[function_component]
pub(crate) fn NotificationView(props: &NotificationProps) -> Html {
    let Some(notification) = props.notification.as_ref() else {
        return html! {};
    };

    let onclick = props.ondismiss.reform(|_: MouseEvent| ());

    html! {
        <Modal>
            <div class="backdrop"/>
            <dialog class={popup_class(notification.kind)} open={true}>
                <article>
                    <h2>{notification.title()}</h2>
                    <p>{notification.message.clone()}</p>
                    <footer>
                        <button {onclick}>{"Okay"}</button>
                    </footer>
                </article>
            </dialog>
        </Modal>
    }
}
