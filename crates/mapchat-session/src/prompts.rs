//! Fixed prompt text used to seed a fresh transcript.

/// Question suggested before any map has been discussed.
pub const DEFAULT_QUESTION: &str = "Suggest 5 questions you can answer about this Wardley Map?";

/// Question suggested right after a session reset.
pub const RESET_QUESTION: &str = "Suggest 3 questions you can answer about this Wardley Map?";

/// Seed `user` message. The `{question}` token is sent literally.
pub const SEED_USER_MESSAGE: &str = "{question} Output as markdown";

/// Seed `assistant` message listing example analytical questions.
pub const SEED_ASSISTANT_MESSAGE: &str = "\
Here is a list of general questions that you could consider asking while examining any Wardley Map:
1. What is the focus of this map - a specific industry, business process, or company's value chain?
2. What are the main user needs the map is addressing, and have all relevant user needs been identified?
3. Are the components correctly placed within the map based on their evolutions (Genesis, Custom Built, Product/Rental, Commodity)?
4. What linkages exist between the components and how do they interact within the value chain?
5. Can you identify any market trends or competitor activities that could impact the positioning of the components?
6. Are there any potential inefficiencies or improvements that could be made in the value chain depicted in the map?
7. How does your organization take advantage of upcoming opportunities or mitigate risks, considering the layout and components' evolutions on the map?
8. Are there any areas where innovation or disruption could significantly alter the landscape represented in the map?
It is essential to provide the actual Wardley Map in question to provide a more accurate, in-depth analysis of specific components or insights tailored to your map.";

/// Builds the seed `system` message with the map text embedded verbatim.
pub fn system_prompt(map_text: &str) -> String {
    format!(
        "As a chatbot, analyze the provided Wardley Map and offer insights and recommendations based on its components.

Suggestions:
Request the Wardley Map for analysis
Explain the analysis process for a Wardley Map
Discuss the key insights derived from the map
Provide recommendations based on the analysis
Offer guidance for potential improvements or adjustments to the map
WARDLEY MAP: {map_text}"
    )
}
