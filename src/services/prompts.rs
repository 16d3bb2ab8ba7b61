//! Instruction texts sent to the generation service.
//!
//! The model treats these as opaque task descriptions. Only the background
//! step of the try-on task and the colour of the recolor task vary.

/// Leading part of every try-on request
pub const TRY_ON_PREAMBLE: &str =
    "You are a specialized AI for virtual clothing try-ons. Follow the XML instructions precisely.";

pub const PERSON_PHOTO_LABEL: &str = "This is the `person_photo`:";
pub const ITEM_PHOTO_LABEL: &str = "This is the `item_photo`:";
pub const BASE_ITEM_LABEL: &str = "This is the `Base Item Image`:";

const TRY_ON_HEAD: &str = r#"<task>
  <goal>Virtual Clothing Try-On</goal>
  <description>Edit the 'person_photo' by replacing the clothing worn by the main subject with the clothing item shown in the 'item_photo'. Preserve the person's pose, body shape and face, and apply realistic fabric physics.</description>

  <inputs>
    <image id="person_photo">The base image containing one or more people and a background. The pose and face of the target person MUST be preserved.</image>
    <image id="item_photo">An image containing the piece of clothing to be applied.</image>
  </inputs>

  <physics_and_realism_guidelines>
    <guideline n="1">Fabric must drape naturally with the pose and gravity, with realistic folds and creases around joints and the waist.</guideline>
    <guideline n="2">Lighting and shadows on the fabric must match the lighting of the 'person_photo'.</guideline>
    <guideline n="3">The clothing must wrap around the body contours; it must never look like a flat sticker.</guideline>
  </physics_and_realism_guidelines>

  <instructions>
    <step n="1">Identify the main subject: the person most in focus, most centered or most prominent. If equally prominent, choose the person on the left.</step>
    <step n="2">Identify the clothing on the main subject.</step>
    <step n="3">Identify the clothing item in the 'item_photo'.</step>
    <step n="4">Replace the main subject's clothing with the item from 'item_photo'.</step>
    <step n="5">Follow every physics and realism guideline; the fit must match the pose and proportions.</step>
    <step n="6">CRITICAL: Keep face, hair and identity from the 'person_photo'. Reconstruct any body parts that the original clothing covered and the new item exposes.</step>
    <step n="7">Do not alter any other people in the photo.</step>
"#;

const TRY_ON_TAIL: &str = r#"  </instructions>

  <critical_rule>
    The 'item_photo' is ONLY a reference for the clothing's appearance. DO NOT use its background. Alter only the main subject's clothing and, if requested, the background.
  </critical_rule>

  <output>
    Produce a single, high-quality, photorealistic image of the main subject wearing the new clothing item. Check that hands, limbs and fabric draping are correct. Output ONLY the final image.
  </output>
</task>"#;

/// Try-on task; an empty or blank directive keeps the original background
pub fn try_on_instructions(background: &str) -> String {
    let background = background.trim();
    let background_step = if background.is_empty() {
        "    <step n=\"8\">CRITICAL: You MUST preserve the entire background of the original 'person_photo'.</step>\n".to_string()
    } else {
        format!(
            "    <step n=\"8\">CRITICAL: You MUST also replace the background of the 'person_photo' with the following: '{}'. The new background must be realistic and blend seamlessly with all subjects.</step>\n",
            background
        )
    };

    format!("{}{}{}", TRY_ON_HEAD, background_step, TRY_ON_TAIL)
}

pub const ENHANCE_INSTRUCTIONS: &str = r#"You are a professional photo editing AI. Enhance the provided image so it looks like a high-resolution photograph from a DSLR camera.

Instructions:
1. Upscale and sharpen fabric textures, facial details and background elements without a 'digital' over-sharpened feel.
2. Enhance the existing lighting: brighter highlights, deeper shadows.
3. Apply professional color grading for a rich, magazine-quality look.
4. Remove AI artifacts and noise.
5. CRITICAL: Do NOT change the person's identity, pose, body shape, clothing or background scene.

Output ONLY the final image."#;

/// Recolor task for a single garment
pub fn recolor_instructions(color: &str) -> String {
    format!(
        r#"You are an expert fashion designer AI. Your task is to re-color a clothing item.

Instructions:
1. Generate a new image of the clothing item from the Base Item Image, recolored to match: '{}'.
2. CRITICAL: Present the item on a plain, solid white background.
3. CRITICAL: No people, mannequins or hangers. Output ONLY the clothing item.
4. CRITICAL: Preserve the original shape, texture and details. Only change the color."#,
        color.trim()
    )
}

/// Turns a short background idea into a descriptive photographic prompt
pub fn expand_background_instructions(idea: &str) -> String {
    format!(
        r#"You are an expert prompt engineer for an AI image generator. Expand the user's simple background description into a rich, photorealistic prompt.

Describe a beautiful high-resolution photograph of the idea, covering lighting, atmosphere and specific details, in one or two cohesive sentences.
Output ONLY the new prompt text, with no conversational text or explanations.

Example:
User Input: "a beach"
Output: "A serene tropical beach at sunset, with soft golden light casting long shadows from palm trees onto pristine white sand, and calm turquoise waves gently lapping the shore."

User Input: "{}""#,
        idea.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_step_preserves_when_empty() {
        let text = try_on_instructions("  ");
        assert!(text.contains("preserve the entire background"));
        assert!(!text.contains("replace the background"));
    }

    #[test]
    fn test_background_step_replaces_when_set() {
        let text = try_on_instructions("a sunny beach");
        assert!(text.contains("replace the background of the 'person_photo' with the following: 'a sunny beach'"));
        assert!(text.starts_with("<task>"));
        assert!(text.ends_with("</task>"));
    }

    #[test]
    fn test_recolor_mentions_color() {
        assert!(recolor_instructions(" a forest green ").contains("'a forest green'"));
    }

    #[test]
    fn test_expand_embeds_idea() {
        assert!(expand_background_instructions("a beach").ends_with("User Input: \"a beach\""));
    }
}
