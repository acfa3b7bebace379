//! Common test fixtures: execution workflows, visual graphs and a small node registry.
use comfyflow::prelude::*;
use serde_json::{Value, json};

/// Routes `log` output through the test harness. Safe to call from every test.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A text-to-image workflow in execution format.
///
/// `10` is declared after the nodes that reference it.
#[allow(dead_code)]
pub fn txt2img_workflow() -> Value {
    json!({
        "sampler": {
            "inputs": {
                "seed": 0,
                "steps": 25,
                "cfg": 6,
                "sampler_name": "euler",
                "scheduler": "karras",
                "denoise": 1,
                "model": ["model", 0],
                "positive": ["general_positive", 0],
                "negative": ["general_negative", 0],
                "latent_image": ["latent_image", 0]
            },
            "class_type": "KSampler",
            "_meta": { "title": "KSampler" }
        },
        "latent_image": {
            "inputs": { "width": 512, "height": 512, "batch_size": 1 },
            "class_type": "EmptyLatentImage",
            "_meta": { "title": "Empty Latent Image" }
        },
        "model": {
            "inputs": { "ckpt_name": "aa", "model_id": "1709400693561386681" },
            "class_type": "CheckpointLoaderSimple",
            "_meta": { "title": "Load Checkpoint" }
        },
        "general_positive": {
            "inputs": { "text": "4k, high quality, anime style, anime, cute", "clip": ["10", 0] },
            "class_type": "CLIPTextEncode",
            "_meta": { "title": "CLIP Text Encode (Prompt)" }
        },
        "general_negative": {
            "inputs": { "text": "lowres, 3d, (bad), text, error, jpeg artifacts", "clip": ["10", 0] },
            "class_type": "CLIPTextEncode",
            "_meta": { "title": "CLIP Text Encode (Prompt)" }
        },
        "5": {
            "inputs": { "samples": ["sampler", 0], "vae": ["model", 2] },
            "class_type": "VAEDecode",
            "_meta": { "title": "VAE Decode" }
        },
        "6": {
            "inputs": { "filename_prefix": "ComfyUI", "images": ["5", 0] },
            "class_type": "SaveImage",
            "_meta": { "title": "Save Image" }
        },
        "10": {
            "inputs": { "stop_at_clip_layer": -2, "clip": ["model", 1] },
            "class_type": "CLIPSetLastLayer",
            "_meta": { "title": "CLIP Set Last Layer" }
        }
    })
}

/// An IP-Adapter extension of `txt2img_workflow`. References `model` and `10`
/// from the base workflow and `image_input`, which neither defines.
#[allow(dead_code)]
pub fn ipadapter_extension() -> Value {
    json!({
        "ipa": {
            "inputs": {
                "weight": 1,
                "weight_type": "style transfer",
                "start_at": 0,
                "end_at": 1,
                "model": ["ipa_loader", 0],
                "ipadapter": ["ipa_loader", 1],
                "image": ["image_input", 0]
            },
            "class_type": "IPAdapterAdvanced",
            "_meta": { "title": "IPAdapter Advanced" }
        },
        "ipa_loader": {
            "inputs": {
                "preset": "PLUS FACE (portraits)",
                "download1": {
                    "type": "custom_model",
                    "file_id": "1709397518130933621",
                    "dir": "models/clip_vision"
                },
                "model": ["model", 0]
            },
            "class_type": "IPAdapterUnifiedLoader",
            "_meta": { "title": "IPAdapter Unified Loader" }
        },
        "ipa_tagger": {
            "inputs": {
                "model": "wd-v1-4-moat-tagger-v2",
                "threshold": 0.35,
                "replace_underscore": false
            },
            "class_type": "WD14Tagger|pysssss"
        },
        "ipa_positive": {
            "inputs": { "text": ["ipa_positive_text", 0], "clip": ["10", 0] },
            "class_type": "CLIPTextEncode"
        },
        "ipa_positive_text": {
            "inputs": { "string1": ["57", 0], "string2": ["ipa_tagger", 0], "delimiter": "," },
            "class_type": "JoinStrings"
        },
        "57": {
            "inputs": { "string": "4k, high quality, anime style" },
            "class_type": "StringConstant"
        }
    })
}

/// The text-to-image pipeline as an editor would save it. Node ids are strings,
/// listed so that the loaders do not come first.
#[allow(dead_code)]
pub fn txt2img_graph() -> Value {
    json!({
        "last_node_id": 6,
        "last_link_id": 9,
        "nodes": [
            {
                "id": "sampler", "type": "KSampler", "pos": [800, 200], "size": [315, 262],
                "flags": {}, "order": 0, "mode": 0,
                "inputs": [
                    { "name": "model", "type": "MODEL", "link": 1 },
                    { "name": "positive", "type": "CONDITIONING", "link": 2 },
                    { "name": "negative", "type": "CONDITIONING", "link": 3 },
                    { "name": "latent_image", "type": "LATENT", "link": 4 }
                ],
                "outputs": [{ "name": "LATENT", "type": "LATENT", "links": [5], "slot_index": 0 }],
                "properties": { "Node name for S&R": "KSampler" },
                "widgets_values": [0, "fixed", 25, 6, "euler", "karras", 1]
            },
            {
                "id": "latent_image", "type": "EmptyLatentImage", "pos": [400, 500], "size": [315, 106],
                "flags": {}, "order": 0, "mode": 0,
                "outputs": [{ "name": "LATENT", "type": "LATENT", "links": [4], "slot_index": 0 }],
                "properties": {}, "widgets_values": [512, 512, 1]
            },
            {
                "id": "model", "type": "CheckpointLoaderSimple", "pos": [0, 200], "size": [315, 98],
                "flags": {}, "order": 0, "mode": 0,
                "outputs": [
                    { "name": "MODEL", "type": "MODEL", "links": [1], "slot_index": 0 },
                    { "name": "CLIP", "type": "CLIP", "links": [8, 9], "slot_index": 1 },
                    { "name": "VAE", "type": "VAE", "links": [6], "slot_index": 2 }
                ],
                "properties": {}, "widgets_values": ["aa.safetensors"]
            },
            {
                "id": "general_positive", "type": "CLIPTextEncode", "pos": [400, 100], "size": [400, 200],
                "flags": {}, "order": 0, "mode": 0,
                "inputs": [{ "name": "clip", "type": "CLIP", "link": 8 }],
                "outputs": [{ "name": "CONDITIONING", "type": "CONDITIONING", "links": [2], "slot_index": 0 }],
                "properties": {}, "widgets_values": ["anime, cute"]
            },
            {
                "id": "general_negative", "type": "CLIPTextEncode", "pos": [400, 300], "size": [400, 200],
                "flags": {}, "order": 0, "mode": 0,
                "inputs": [{ "name": "clip", "type": "CLIP", "link": 9 }],
                "outputs": [{ "name": "CONDITIONING", "type": "CONDITIONING", "links": [3], "slot_index": 0 }],
                "properties": {}, "widgets_values": ["lowres"]
            },
            {
                "id": "5", "type": "VAEDecode", "pos": [1200, 200], "size": [210, 46],
                "flags": {}, "order": 0, "mode": 0,
                "inputs": [
                    { "name": "samples", "type": "LATENT", "link": 5 },
                    { "name": "vae", "type": "VAE", "link": 6 }
                ],
                "outputs": [{ "name": "IMAGE", "type": "IMAGE", "links": [7], "slot_index": 0 }],
                "properties": {}
            },
            {
                "id": "6", "type": "SaveImage", "pos": [1500, 200], "size": [315, 270],
                "flags": {}, "order": 0, "mode": 0,
                "inputs": [{ "name": "images", "type": "IMAGE", "link": 7 }],
                "properties": {}, "widgets_values": ["ComfyUI"]
            }
        ],
        "links": [
            [1, "model", 0, "sampler", 0, "MODEL"],
            [2, "general_positive", 0, "sampler", 1, "CONDITIONING"],
            [3, "general_negative", 0, "sampler", 2, "CONDITIONING"],
            [4, "latent_image", 0, "sampler", 3, "LATENT"],
            [5, "sampler", 0, "5", 0, "LATENT"],
            [6, "model", 2, "5", 1, "VAE"],
            [7, "5", 0, "6", 0, "IMAGE"],
            [8, "model", 1, "general_positive", 0, "CLIP"],
            [9, "model", 1, "general_negative", 0, "CLIP"]
        ],
        "groups": [
            { "title": "Prompt", "bounding": [380, 40, 440, 500], "color": "#3f789e", "font_size": 24, "locked": false }
        ],
        "config": {},
        "extra": { "ds": { "scale": 1.0, "offset": [0, 0] } },
        "version": 0.4
    })
}

/// A checkpoint feeding a sampler through a bypassed ControlNet-style patch node.
///
/// The patch node's first input is the control net, so the walk has to fall
/// through to its second slot to find the `MODEL` input.
#[allow(dead_code)]
pub fn controlnet_bypass_graph() -> Value {
    json!({
        "last_node_id": 4,
        "last_link_id": 3,
        "nodes": [
            {
                "id": 1, "type": "CheckpointLoaderSimple", "mode": 0,
                "outputs": [
                    { "name": "MODEL", "type": "MODEL", "links": [2] },
                    { "name": "CLIP", "type": "CLIP", "links": null }
                ]
            },
            {
                "id": 2, "type": "ControlNetLoader", "mode": 0,
                "outputs": [{ "name": "CONTROL_NET", "type": "CONTROL_NET", "links": [1] }]
            },
            {
                "id": 3, "type": "ControlNetApply", "mode": 4,
                "inputs": [
                    { "name": "control_net", "type": "CONTROL_NET", "link": 1 },
                    { "name": "model", "type": "MODEL", "link": 2 }
                ],
                "outputs": [{ "name": "MODEL", "type": "MODEL", "links": [3] }]
            },
            {
                "id": 4, "type": "KSampler", "mode": 0,
                "inputs": [{ "name": "model", "type": "MODEL", "link": 3 }],
                "outputs": [{ "name": "LATENT", "type": "LATENT", "links": [] }]
            }
        ],
        "links": [
            [1, 2, 0, 3, 0, "CONTROL_NET"],
            [2, 1, 0, 3, 1, "MODEL"],
            [3, 3, 0, 4, 0, "MODEL"]
        ],
        "version": 0.4
    })
}

/// A node whose only input and output are both `ty`.
#[allow(dead_code)]
pub fn pass_through(id: i32, node_type: &str, ty: &str) -> GraphNode {
    GraphNode::new(id, node_type)
        .with_inputs(vec![InputSlot::new(ty.to_lowercase(), SlotType::named(ty))])
        .with_outputs(vec![OutputSlot::new(ty, SlotType::named(ty))])
}

/// A node with a single output of type `ty`.
#[allow(dead_code)]
pub fn source(id: i32, node_type: &str, ty: &str) -> GraphNode {
    GraphNode::new(id, node_type).with_outputs(vec![OutputSlot::new(ty, SlotType::named(ty))])
}

/// Slot layouts for the classes used in `txt2img_workflow`.
#[allow(dead_code)]
pub struct TestDefinitions;

impl NodeDefinitions for TestDefinitions {
    fn input_slots(&self, class_type: &str) -> Option<Vec<InputSlot>> {
        let slots: &[(&str, &str)] = match class_type {
            "KSampler" => &[
                ("model", "MODEL"),
                ("positive", "CONDITIONING"),
                ("negative", "CONDITIONING"),
                ("latent_image", "LATENT"),
            ],
            "CLIPTextEncode" | "CLIPSetLastLayer" => &[("clip", "CLIP")],
            "VAEDecode" => &[("samples", "LATENT"), ("vae", "VAE")],
            "SaveImage" => &[("images", "IMAGE")],
            "EmptyLatentImage" | "CheckpointLoaderSimple" => &[],
            _ => return None,
        };
        Some(
            slots
                .iter()
                .map(|(name, ty)| InputSlot::new(*name, SlotType::named(*ty)))
                .collect(),
        )
    }

    fn output_slots(&self, class_type: &str) -> Option<Vec<OutputSlot>> {
        let types: &[&str] = match class_type {
            "KSampler" | "EmptyLatentImage" => &["LATENT"],
            "CheckpointLoaderSimple" => &["MODEL", "CLIP", "VAE"],
            "CLIPTextEncode" => &["CONDITIONING"],
            "CLIPSetLastLayer" => &["CLIP"],
            "VAEDecode" => &["IMAGE"],
            "SaveImage" => &[],
            _ => return None,
        };
        Some(
            types
                .iter()
                .map(|ty| OutputSlot::new(*ty, SlotType::named(*ty)))
                .collect(),
        )
    }
}
