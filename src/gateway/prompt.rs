//! Instruction text sent with each generation request
//!
//! Selection is plain data: a `match` over the request parameters.

use super::GenerationMode;
use crate::state::data::Category;

pub fn portrait(mode: GenerationMode) -> &'static str {
    match mode {
        GenerationMode::Personal => {
            "You are an expert fashion photographer AI. Transform the person in this image into a \
             full-body fashion model photo suitable for an e-commerce website. The background must \
             be a clean, neutral studio backdrop (light gray, #f0f0f0). The person should have a \
             neutral, professional model expression. Preserve the person's identity, unique \
             features, and body type, but place them in a standard, relaxed standing model pose. \
             The final image must be photorealistic. Return ONLY the final image."
        }
        GenerationMode::Couple => {
            "You are an expert portrait photographer AI. Transform the couple in this image into a \
             high-quality professional studio photo.\n\
             1. Background: clean, neutral studio backdrop (light gray, #f0f0f0).\n\
             2. Subjects: preserve the identity, facial features, and body types of BOTH individuals.\n\
             3. Interaction: keep the connection and relative positioning of the couple natural.\n\
             4. Style: photorealistic, high-end studio quality.\n\
             5. Output: return ONLY the final image."
        }
        GenerationMode::Family => {
            "You are an expert family photographer AI. Transform the family group in this image \
             into a professional studio family portrait.\n\
             1. Background: clean, neutral studio backdrop (light gray, #f0f0f0).\n\
             2. Subjects: strictly preserve the identities, faces, ages, and body types of ALL \
             family members in the photo.\n\
             3. Composition: a cohesive, balanced group composition suitable for a family album.\n\
             4. Style: warm, professional, photorealistic studio lighting.\n\
             5. Output: return ONLY the final image."
        }
        GenerationMode::Dreammate => {
            "You are an expert creative photographer AI. The photo shows a single person. Generate \
             a photo of this person together with an imaginary, attractive partner.\n\
             1. Subject: preserve the identity and appearance of the uploaded person.\n\
             2. Partner: a realistic partner standing next to or interacting with the person, \
             matching the lighting and style.\n\
             3. Context: a happy couple photo in a studio setting.\n\
             4. Style: photorealistic, high-quality.\n\
             5. Background: clean, neutral studio backdrop.\n\
             6. Output: return ONLY the final image."
        }
    }
}

pub fn try_on(category: Category) -> &'static str {
    match category {
        Category::Accessories => {
            "You are an expert virtual stylist. Add the accessory from the 'garment image' to the \
             person in the 'model image'.\n\
             1. Placement: place the accessory realistically (hat on head, scarf around neck, \
             sunglasses on face, bag on shoulder or in hand). With several people, apply it to the \
             main subject.\n\
             2. Preserve outfit: DO NOT remove the existing clothing; the accessory is worn WITH it.\n\
             3. Integration: match lighting, shadows, and perspective.\n\
             4. Identity: preserve face, hair (unless covered), and body.\n\
             5. Output: return ONLY the final image with the accessory added."
        }
        Category::Outerwear => {
            "You are an expert virtual stylist. Layer the outerwear from the 'garment image' OVER \
             the current outfit of the person in the 'model image'.\n\
             1. Preserve context: visible parts of the underlying outfit (collar, hem, pants) stay \
             visible where appropriate. Do not remove bottoms.\n\
             2. Realism: realistic fabric folds, fit, and shadows.\n\
             3. Output: return ONLY the final image."
        }
        Category::Traditional => {
            "You are an expert cultural stylist. Dress the person in the 'model image' in the \
             traditional Indonesian attire (Pakaian Adat) from the 'garment image'.\n\
             1. Full transformation: replace the current outfit completely.\n\
             2. Cultural details: faithfully keep patterns, jewelry, headpieces, and fabrics.\n\
             3. Fit and drape: respect how traditional fabric drapes on the body.\n\
             4. Identity: preserve face and body shape.\n\
             5. Output: return ONLY the final image."
        }
        Category::Swimwear => {
            "You are an expert swimwear stylist. Dress the person in the 'model image' in the \
             swimwear from the 'garment image'.\n\
             1. Outfit replacement: replace the current outfit completely.\n\
             2. Fit and anatomy: natural fit, accurate anatomy and skin tone for exposed areas.\n\
             3. Respectful realism: tasteful and photorealistic, suitable for a fashion catalog.\n\
             4. Identity: strictly preserve face, hair, and body structure.\n\
             5. Output: return ONLY the final image."
        }
        Category::Tops
        | Category::Bottoms
        | Category::Dresses
        | Category::Suits
        | Category::Custom => {
            "You are an expert virtual try-on AI. You will be given a 'model image' and a 'garment \
             image'. Create a new photorealistic image where the subject(s) from the 'model image' \
             wear the clothing from the 'garment image'.\n\
             1. Garment swap: identify the garment type (top, bottom, dress) and replace ONLY the \
             corresponding item.\n\
             2. Preserve the model: faces, hair, body shapes, and poses MUST remain unchanged.\n\
             3. Preserve the background perfectly.\n\
             4. Apply the garment with natural folds, shadows, and lighting.\n\
             5. Output: return ONLY the final, edited image. Do not include any text."
        }
    }
}

pub fn pose_change(pose: &str) -> String {
    format!(
        "You are an expert fashion photographer AI. Take this image and regenerate it from a \
         different perspective. The person, clothing, and background style must remain identical. \
         The new perspective should be: \"{}\". Return ONLY the final image.",
        pose
    )
}

pub fn pose_from_reference() -> &'static str {
    "You are an expert fashion photographer AI. Regenerate the 'model image' so the subject adopts \
     the exact pose of the person in the 'reference pose image'.\n\
     1. Pose matching: copy body language, limb positioning, and head angle from the reference.\n\
     2. Preserve identity: face, hair, and body type MUST remain identical to the 'model image'.\n\
     3. Preserve clothing: the exact same outfit as in the 'model image'.\n\
     4. Background: consistent with the 'model image'.\n\
     5. Output: return ONLY the final image."
}

pub fn recolor(color: &str) -> String {
    format!(
        "You are an expert fashion designer AI. Change the color of this garment item to {color}.\n\
         1. Color change: apply the color '{color}' to the fabric of the garment.\n\
         2. Preserve texture: keep fabric textures, folds, shading, and material properties.\n\
         3. Preserve shape: the outline of the garment must remain exactly the same.\n\
         4. Background: keep it transparent or neutral white/gray as in the original.\n\
         5. Output: return ONLY the final image of the garment."
    )
}
