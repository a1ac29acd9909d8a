//! Fixed replies used when no model answer is available.
//!
//! The greeting follows the same section convention as model replies, so it
//! renders as a panel and offers suggestions like any other reply.

use crate::language::Language;

/// Welcome reply for a greeting-only message.
pub fn greeting(language: Language) -> &'static str {
    match language {
        Language::English => {
            "Summary:\n\
             Hello, I'm your Adaptive Gaming Guide.\n\
             \n\
             Recommendations:\n\
             - Ask about adaptive controllers, switches and accessible setups.\n\
             - Tell me about the player's abilities so I can tailor suggestions.\n\
             \n\
             Next questions:\n\
             - What type of player or patient are you supporting?\n\
             - Which console or game are you working with?"
        }
        Language::Spanish => {
            "Resumen:\n\
             Hola, soy tu Guía de Juegos Adaptativos.\n\
             \n\
             Recomendaciones:\n\
             - Pregúntame por controles adaptativos, interruptores y configuraciones accesibles.\n\
             - Cuéntame las habilidades del jugador para adaptar las sugerencias.\n\
             \n\
             Siguientes preguntas:\n\
             - ¿Qué tipo de jugador o paciente quieres apoyar?\n\
             - ¿Qué consola o juego estás usando?"
        }
    }
}

/// Offline reply that repeats the message back.
pub fn echo(message: &str, language: Language) -> String {
    match language {
        Language::English => format!("You said: {message}"),
        Language::Spanish => format!("Dijiste: {message}"),
    }
}

/// Substitute for an empty model reply.
pub fn no_answer(language: Language) -> &'static str {
    match language {
        Language::English => "No answer.",
        Language::Spanish => "No tengo respuesta.",
    }
}

/// Short offer of help.
pub fn help_offer(language: Language) -> &'static str {
    match language {
        Language::English => "Hi! How can I help?",
        Language::Spanish => "Hola, ¿en qué puedo ayudarte?",
    }
}
