use common::{ChatMessage, Sender, Transcript};
use web_sys::{HtmlInputElement, ScrollBehavior, ScrollIntoViewOptions};
use yew::prelude::*;

use crate::api_client::chat::send_message;

const UNREACHABLE_REPLY: &str = "Sorry, I can't reach the assistant right now. Please try again.";

/// Floating chat window, collapsed to a round button by default.
#[function_component(Chatbot)]
pub fn chatbot() -> Html {
    let is_open = use_state(|| false);
    let transcript = use_state(Transcript::default);
    let input_value = use_state(String::new);
    let is_waiting = use_state(|| false);
    let messages_end = use_node_ref();

    {
        let messages_end = messages_end.clone();
        use_effect_with(transcript.len(), move |_| {
            if let Some(element) = messages_end.cast::<web_sys::Element>() {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                element.scroll_into_view_with_scroll_into_view_options(&options);
            }
            || ()
        });
    }

    let toggle = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(!*is_open))
    };

    let send = {
        let transcript = transcript.clone();
        let input_value = input_value.clone();
        let is_waiting = is_waiting.clone();

        Callback::from(move |_: ()| {
            if *is_waiting {
                return;
            }

            let mut next = (*transcript).clone();
            let Some(message) = next.push_user(&input_value) else {
                return;
            };
            transcript.set(next.clone());
            input_value.set(String::new());
            is_waiting.set(true);

            let transcript = transcript.clone();
            let is_waiting = is_waiting.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let reply = match send_message(&message).await {
                    Ok(reply) => reply,
                    Err(_) => ChatMessage::bot(UNREACHABLE_REPLY),
                };
                next.push(reply);
                transcript.set(next);
                is_waiting.set(false);
            });
        })
    };

    let on_input = {
        let input_value = input_value.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            input_value.set(input.value());
        })
    };

    let on_keypress = {
        let send = send.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                send.emit(());
            }
        })
    };

    let on_send = {
        let send = send.clone();
        Callback::from(move |_: MouseEvent| send.emit(()))
    };

    html! {
        <div class="fixed bottom-5 right-5 z-50">
            {if *is_open {
                html! {
                    <div class="card bg-base-100 shadow-2xl w-[350px] h-[500px] flex flex-col overflow-hidden">
                        <div class="bg-success text-success-content p-4 flex justify-between items-center">
                            <h3 class="font-bold text-lg">{"Chatbot"}</h3>
                            <button class="btn btn-sm btn-ghost" onclick={toggle}>{"−"}</button>
                        </div>
                        <div class="flex-1 p-4 overflow-y-auto bg-base-200 space-y-2">
                            {for transcript.messages().iter().enumerate().map(|(index, message)| {
                                let class = match message.sender {
                                    Sender::User => "chat chat-end",
                                    Sender::Bot => "chat chat-start",
                                };
                                let bubble = match message.sender {
                                    Sender::User => "chat-bubble chat-bubble-success",
                                    Sender::Bot => "chat-bubble",
                                };
                                html! {
                                    <div key={index} class={class}>
                                        <div class={bubble}>{&message.text}</div>
                                    </div>
                                }
                            })}
                            {if *is_waiting {
                                html! {
                                    <div class="chat chat-start">
                                        <div class="chat-bubble"><span class="loading loading-dots loading-sm"></span></div>
                                    </div>
                                }
                            } else {
                                html! {}
                            }}
                            <div ref={messages_end}></div>
                        </div>
                        <div class="flex gap-2 p-3 border-t border-base-300">
                            <input
                                type="text"
                                class="input input-bordered input-sm flex-1"
                                placeholder="Type your message..."
                                value={(*input_value).clone()}
                                oninput={on_input}
                                onkeypress={on_keypress}
                            />
                            <button class="btn btn-sm btn-success" onclick={on_send}>{"Send"}</button>
                        </div>
                    </div>
                }
            } else {
                html! {
                    <button class="btn btn-circle btn-success btn-lg shadow-lg" onclick={toggle}>
                        {"Chat"}
                    </button>
                }
            }}
        </div>
    }
}
