/// Reusable UI components

use yew::prelude::*;
use web_sys::HtmlInputElement;

#[derive(Properties, PartialEq)]
pub struct OptionToggleProps {
    /// Preference key, also used as the input id
    pub option: &'static str,
    pub label: AttrValue,
    pub checked: bool,
    #[prop_or(false)]
    pub disabled: bool,
    pub ontoggle: Callback<(&'static str, bool)>,
}

#[function_component(OptionToggle)]
pub fn option_toggle(props: &OptionToggleProps) -> Html {
    let onchange = {
        let option = props.option;
        let ontoggle = props.ontoggle.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                ontoggle.emit((option, input.checked()));
            }
        })
    };

    html! {
        <div class="option-row">
            <label class="option-label">
                <input
                    type="checkbox"
                    id={props.option}
                    checked={props.checked}
                    disabled={props.disabled}
                    onchange={onchange}
                />
                <span class="option-text">{props.label.clone()}</span>
            </label>
        </div>
    }
}
