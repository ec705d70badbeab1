//! Application-wide prediction form state.
//!
//! The form lives above the router so the chart page can read the last
//! prediction and the form keeps its values across navigation.

use std::rc::Rc;

use common::{FormController, FormField, Prediction, RecentEvent};
use yew::prelude::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub controller: FormController,
}

pub enum FormAction {
    UpdateField(FormField, String),
    /// Controller already advanced by the caller, e.g. after `begin_submission`.
    Replace(FormController),
    Complete(Result<Prediction, String>),
    LoadExample,
    LoadEvent(RecentEvent),
    Reset,
    DismissAlert,
}

impl Reducible for FormState {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut controller = self.controller.clone();
        match action {
            FormAction::UpdateField(field, value) => controller.update_field(field, value),
            FormAction::Replace(next) => controller = next,
            FormAction::Complete(outcome) => controller.complete_submission(outcome),
            FormAction::LoadExample => controller.load_example(),
            FormAction::LoadEvent(event) => controller.load_event(&event),
            FormAction::Reset => controller.reset(),
            FormAction::DismissAlert => controller.dismiss_alert(),
        }
        Rc::new(Self { controller })
    }
}

pub type FormContext = UseReducerHandle<FormState>;

#[derive(Properties, PartialEq)]
pub struct FormProviderProps {
    pub children: Children,
}

#[function_component(FormProvider)]
pub fn form_provider(props: &FormProviderProps) -> Html {
    let state = use_reducer(FormState::default);

    html! {
        <ContextProvider<FormContext> context={state}>
            {props.children.clone()}
        </ContextProvider<FormContext>>
    }
}
