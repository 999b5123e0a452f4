//! Prompt construction for transcript categorization
//!
//! The instruction block pins the exact Spanish enum values the data model
//! deserializes, so prompt text and `models::categorization` renames must
//! stay in sync.

/// Shared categorization instructions (single and batch prompts)
const CATEGORIZATION_INSTRUCTIONS: &str = r#"
**INSTRUCCIONES CRÍTICAS:**

1. **sector_principal**: Identifica el sector principal de entre: ["Tecnología / Software / SaaS", "Retail / E-commerce", "Salud", "Consultoría", "Educación / EdTech", "Alimentación / Restaurantes / Catering", "Logística / Transporte", "Turismo / Hospitalidad", "Eventos", "Moda sostenible", "Otros"]. Elige el más cercano o usa "Otros".

2. **sector_secundario**: Especifica el subsector (ej: "Fintech", "EdTech", "SaaS", "Clínica dental", etc.). Si no hay información, usa null.

3. **volumen_numerico**: Extrae el número de interacciones mencionadas y NORMALÍZALO A INTERACCIONES POR SEMANA:
- Si dice "80 diarias" → 80 × 7 = 560 semanales
- Si dice "500 semanales" → 500 semanales
- Si dice "2000 mensuales" → 2000 ÷ 4 = 500 semanales
- Si no hay número concreto, usa null

4. **volumen_nivel**: Clasifica el volumen SEMANAL:
- "Bajo (<100)" si < 100 por semana
- "Medio (100-250)" si 100-250 por semana
- "Alto (251-500)" si 251-500 por semana
- "Muy Alto (>500)" si > 500 por semana
- "Desconocido" si no hay información

5. **es_pico_estacional**: TRUE si menciona: "picos", "temporada alta", "promociones", "duplicarse", "triplicarse". FALSE en caso contrario.

6. **fuente_primaria**: De dónde nos conoció: ["Evento/Conferencia", "Recomendación", "Búsqueda Online", "LinkedIn/Publicación", "Webinar/Podcast", "Otro"]

7. **fuente_detalle**: Texto específico que describe la fuente.

8. **preocupaciones**: Array de MÁXIMO 3 preocupaciones ordenadas por importancia. Para cada una:
- **tipo**: ["Integración con sistemas", "Personalización/Tono de marca", "Confidencialidad/Compliance", "Multilingüe/Internacional", "Volumen extremo", "Consultas técnicas complejas", "Urgencia en tiempo real", "Otra"]
- **impacto**: ["Alto", "Medio", "Bajo"]
- **ejemplo_frase**: Copia textual de 10-30 palabras

9. **urgencia_nivel**: ["Alta", "Media", "Baja"]

10. **potencial_upsell**: Array de add-ons valorados: ["Integración con CRM/Tickets existente", "Soporte multicanal (WhatsApp, IG, Email, etc.)", "Escalamiento automático en temporada alta / picos", "Respuestas personalizadas con tono de marca", "Reportes y analíticos de atención al cliente"]
"#;

/// Build the prompt for a single-transcript categorization
pub fn build_single_prompt(transcript: &str, client_name: &str) -> String {
    format!(
        "Eres un analista experto de ventas B2B. Tu tarea es analizar la siguiente \
         transcripción de una reunión comercial y extraer información estructurada clave.\n\n\
         **Cliente:** {client_name}\n\n\
         **Transcripción:**\n{transcript}\n\
         {CATEGORIZATION_INSTRUCTIONS}\n\
         **IMPORTANTE:** Devuelve SOLO el JSON estructurado, sin texto adicional antes o después.\n"
    )
}

/// Build the prompt covering a whole group of transcripts
///
/// Instructs the model to return a JSON array with exactly one object per
/// transcript; the client enforces that cardinality on the response.
pub fn build_batch_prompt(
    transcripts: &[String],
    client_names: &[String],
    group_start: usize,
) -> String {
    let group_size = transcripts.len();
    let mut prompt = format!(
        "Eres un analista experto de ventas B2B. Analiza las siguientes {group_size} \
         transcripciones de reuniones comerciales y devuelve un array JSON con exactamente \
         {group_size} objetos, uno por cada transcripción.\n\
         {CATEGORIZATION_INSTRUCTIONS}\n\
         **TRANSCRIPCIONES A ANALIZAR:**\n"
    );

    for (i, (transcript, name)) in transcripts.iter().zip(client_names).enumerate() {
        prompt.push_str(&format!(
            "\n---\n**TRANSCRIPCIÓN #{}**\n**Cliente:** {}\n**Texto:**\n{}\n",
            group_start + i + 1,
            name,
            transcript
        ));
    }

    prompt.push_str(&format!(
        "\n---\n\n**IMPORTANTE:** Devuelve SOLO un array JSON con exactamente {group_size} \
         objetos, sin texto adicional antes o después.\n\
         Formato: [{{\"sector_principal\": \"...\", \"sector_secundario\": \"...\", ...}}, \
         {{\"sector_principal\": \"...\", ...}}, ...]\n"
    ));

    prompt
}
