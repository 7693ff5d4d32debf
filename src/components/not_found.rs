use yew::prelude::*;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! { <h2>{"Page Not Found"}</h2> }
}
