//! User-facing strings in each supported language

use crate::domain::Language;

/// Fixed strings shown by the CLI and TUI
#[derive(Debug)]
pub struct Messages {
    pub app_title: &'static str,
    pub app_subtitle: &'static str,
    pub unknown_error: &'static str,
    pub places_error: &'static str,

    pub destination: &'static str,
    pub destination_placeholder: &'static str,
    pub duration: &'static str,
    pub budget: &'static str,
    pub budget_per_person: &'static str,
    pub interests: &'static str,
    pub other_interest_placeholder: &'static str,
    pub requirements: &'static str,
    pub submit: &'static str,
    pub generating: &'static str,

    pub required: &'static str,
    pub positive_number: &'static str,
    pub budget_min: &'static str,

    pub itinerary_title: &'static str,
    pub justification_title: &'static str,
    pub interests_heading: &'static str,
    pub budget_heading: &'static str,
    pub requirements_heading: &'static str,
    pub day: &'static str,
    pub view_on_map: &'static str,
    pub more_info: &'static str,
    pub hide_info: &'static str,
    pub loading: &'static str,
    pub fetch_error: &'static str,
    pub updated_info: &'static str,
    pub sources: &'static str,
    pub web_link: &'static str,
    pub map_link: &'static str,
    pub new_plan: &'static str,
    pub generation_error: &'static str,
    pub configuration_error: &'static str,

    pub csv_header: [&'static str; 5],
}

const EN: Messages = Messages {
    app_title: "AI Travel Planner Pro",
    app_subtitle: "Craft your perfect journey. Just share your travel dreams, and our AI will handle the details.",
    unknown_error: "An unknown error occurred.",
    places_error: "Could not load city data. Destination suggestions are unavailable.",

    destination: "Destination",
    destination_placeholder: "E.g., Tokyo, Japan",
    duration: "Duration (days)",
    budget: "Estimated Budget",
    budget_per_person: "per person (e.g., in USD)",
    interests: "Key Interests",
    other_interest_placeholder: "E.g., Photography, Bird Watching...",
    requirements: "Specific Requirements / Restrictions",
    submit: "Generate Travel Plan",
    generating: "Generating Your Adventure...",

    required: "This field is required",
    positive_number: "Please enter a positive number",
    budget_min: "Budget must be a number greater than",

    itinerary_title: "Your Personalized Itinerary for",
    justification_title: "AI's Justification",
    interests_heading: "Interests",
    budget_heading: "Budget",
    requirements_heading: "Requirements",
    day: "Day",
    view_on_map: "View on Map",
    more_info: "More Info",
    hide_info: "Hide Info",
    loading: "Loading...",
    fetch_error: "Could not fetch details. Please try again.",
    updated_info: "Updated Information for",
    sources: "Sources:",
    web_link: "Web Link",
    map_link: "Map Link",
    new_plan: "Create a New Plan",
    generation_error: "Error generating itinerary. The model may have returned an invalid format.",
    configuration_error: "The API key is not configured. Set it in the environment and restart.",

    csv_header: ["Day", "Time", "Activity", "Cost", "Location"],
};

const ES: Messages = Messages {
    app_title: "Planificador de Viajes IA Pro",
    app_subtitle: "Crea tu viaje perfecto. Solo comparte tus sueños de viaje y nuestra IA se encargará de los detalles.",
    unknown_error: "Ocurrió un error desconocido.",
    places_error: "No se pudieron cargar los datos de las ciudades. Las sugerencias de destino no están disponibles.",

    destination: "Destino",
    destination_placeholder: "Ej: Tokio, Japón",
    duration: "Duración (días)",
    budget: "Presupuesto Estimado",
    budget_per_person: "por persona (ej: en USD)",
    interests: "Intereses Clave",
    other_interest_placeholder: "Ej: Fotografía, Avistamiento de aves...",
    requirements: "Requisitos / Restricciones Específicas",
    submit: "Generar Plan de Viaje",
    generating: "Generando Tu Aventura...",

    required: "Este campo es obligatorio",
    positive_number: "Por favor, ingresa un número positivo",
    budget_min: "El presupuesto debe ser un número mayor a",

    itinerary_title: "Tu Itinerario Personalizado para",
    justification_title: "Justificación de la IA",
    interests_heading: "Intereses",
    budget_heading: "Presupuesto",
    requirements_heading: "Requisitos",
    day: "Día",
    view_on_map: "Ver en el Mapa",
    more_info: "Más Info",
    hide_info: "Ocultar Info",
    loading: "Cargando...",
    fetch_error: "No se pudieron obtener los detalles. Por favor, inténtalo de nuevo.",
    updated_info: "Información Actualizada para",
    sources: "Fuentes:",
    web_link: "Enlace Web",
    map_link: "Enlace de Mapa",
    new_plan: "Crear un Nuevo Plan",
    generation_error: "Error al generar el itinerario. Es posible que el modelo haya devuelto un formato inválido.",
    configuration_error: "La clave de API no está configurada. Defínela en el entorno y reinicia.",

    csv_header: ["Día", "Hora", "Actividad", "Costo", "Ubicación"],
};

impl Messages {
    pub fn for_language(lang: Language) -> &'static Messages {
        match lang {
            Language::En => &EN,
            Language::Es => &ES,
        }
    }
}
